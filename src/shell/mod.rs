//! Subprocess execution and platform checks.

pub mod command;
pub mod platform;

pub use command::{render_command, run, run_check, CommandOptions, CommandOutput};
pub use platform::{is_ci, is_elevated};
