//! Host environment probing.
//!
//! Everything here observes and reports; nothing in this module mutates
//! the host. Failures surface as `None`, never as errors; the installer
//! decides what is advisory and what is fatal.

pub mod disk;
pub mod lookup;
pub mod os_release;

pub use disk::{free_space, free_space_for};
pub use lookup::{command_on_path, is_executable, parse_system_path, resolve_on_path};
pub use os_release::OsRelease;
