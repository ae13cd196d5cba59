//! Error types for packmule operations.
//!
//! This module defines [`PackmuleError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PackmuleError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PackmuleError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use thiserror::Error;

/// Core error type for packmule operations.
#[derive(Debug, Error)]
pub enum PackmuleError {
    /// A precondition for installing was not met (e.g. not running as root).
    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    /// No usable network path to the artifact host.
    #[error("Network unavailable: {message}")]
    Connectivity { message: String },

    /// Artifact download failed after connectivity looked healthy.
    #[error("Download from {url} failed: {message}")]
    Download { url: String, message: String },

    /// Downloaded artifact failed validation before install.
    #[error("Downloaded artifact is invalid: {message}")]
    ArtifactInvalid { message: String },

    /// Post-install verification failed.
    #[error("Verification failed: {message}")]
    Verification { message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The user declined to continue at a confirmation gate.
    #[error("Aborted: {message}")]
    Aborted { message: String },

    /// Interrupted by SIGINT.
    #[error("Interrupted")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client error wrapper.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PackmuleError {
    /// Process exit code for this error. Interrupts use the conventional
    /// 128+SIGINT code; everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackmuleError::Interrupted => 130,
            _ => 1,
        }
    }
}

/// Result type alias for packmule operations.
pub type Result<T> = std::result::Result<T, PackmuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_displays_message() {
        let err = PackmuleError::Precondition {
            message: "root privileges required".into(),
        };
        assert!(err.to_string().contains("root privileges required"));
    }

    #[test]
    fn connectivity_displays_message() {
        let err = PackmuleError::Connectivity {
            message: "all probes failed".into(),
        };
        assert!(err.to_string().contains("all probes failed"));
    }

    #[test]
    fn download_displays_url_and_message() {
        let err = PackmuleError::Download {
            url: "https://example.com/sysfetch".into(),
            message: "connection reset".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/sysfetch"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn artifact_invalid_displays_message() {
        let err = PackmuleError::ArtifactInvalid {
            message: "missing shebang".into(),
        };
        assert!(err.to_string().contains("missing shebang"));
    }

    #[test]
    fn verification_displays_message() {
        let err = PackmuleError::Verification {
            message: "sysfetch not resolvable on PATH".into(),
        };
        assert!(err.to_string().contains("not resolvable"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = PackmuleError::CommandFailed {
            command: "apt-get install -y curl".into(),
            code: Some(100),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt-get install -y curl"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn aborted_displays_message() {
        let err = PackmuleError::Aborted {
            message: "declined to continue without network".into(),
        };
        assert!(err.to_string().contains("declined"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PackmuleError = io_err.into();
        assert!(matches!(err, PackmuleError::Io(_)));
    }

    #[test]
    fn interrupted_exit_code_is_130() {
        assert_eq!(PackmuleError::Interrupted.exit_code(), 130);
    }

    #[test]
    fn other_errors_exit_1() {
        let err = PackmuleError::Precondition {
            message: "test".into(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PackmuleError::Aborted {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
