//! Plain-text run log.
//!
//! Every pipeline run appends timestamped lines to a log file under the
//! configured log directory, so a failed install on a remote box leaves
//! something to read after the terminal scrollback is gone. Logging is
//! strictly best-effort: a read-only disk must not break an install.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only log for one installer run.
pub struct RunLog {
    file: Option<File>,
    path: Option<PathBuf>,
}

impl RunLog {
    /// Open a fresh timestamped log file under `dir`.
    ///
    /// Falls back to a disabled log if the directory or file cannot be
    /// created.
    pub fn create(dir: &Path) -> Self {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("packmule-{}.log", timestamp));

        if fs::create_dir_all(dir).is_err() {
            return Self::disabled();
        }

        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                debug!("run log at {}", path.display());
                Self {
                    file: Some(file),
                    path: Some(path),
                }
            }
            Err(_) => Self::disabled(),
        }
    }

    /// A log that drops everything written to it.
    pub fn disabled() -> Self {
        Self {
            file: None,
            path: None,
        }
    }

    /// Append one timestamped line. Write errors are swallowed.
    pub fn line(&mut self, msg: &str) {
        if let Some(file) = self.file.as_mut() {
            let timestamp = chrono::Local::now().format("%H:%M:%S");
            writeln!(file, "[{}] {}", timestamp, msg).ok();
        }
    }

    /// Where this run is being logged, if anywhere.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
