//! Packmule - guided installer for the sysfetch hardware report script.
//!
//! Packmule replaces a hand-maintained `curl | sh` routine with a single
//! binary that checks the host, installs the tools sysfetch shells out
//! to, configures lm-sensors, and drops the script into place atomically.
//!
//! # Modules
//!
//! - [`artifact`] - Script download, freshness check, and verification
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Resolved installer settings and defaults
//! - [`error`] - Error types and result aliases
//! - [`interrupt`] - SIGINT flag and between-step checks
//! - [`logfile`] - Best-effort plain-text run log
//! - [`net`] - Connectivity probing
//! - [`pipeline`] - The install sequence itself
//! - [`pm`] - Package manager detection and dependency installs
//! - [`probe`] - OS identification, PATH lookups, disk space
//! - [`sensors`] - lm-sensors detection and kernel module reload
//! - [`shell`] - Shell command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use packmule::artifact::extract_version;
//!
//! let version = extract_version("sysfetch 1.4.2 (linux)");
//! assert_eq!(version.as_deref(), Some("1.4.2"));
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod logfile;
pub mod net;
pub mod pipeline;
pub mod pm;
pub mod probe;
pub mod sensors;
pub mod shell;
pub mod ui;

pub use error::{PackmuleError, Result};
