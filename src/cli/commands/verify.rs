//! Verify command implementation.
//!
//! The `packmule verify` command runs the post-install verifier on its
//! own: does the installed name resolve, is it executable, is it
//! shadowed, what version does it report.

use crate::artifact::{default_version_probe, verify_install};
use crate::cli::args::VerifyArgs;
use crate::config::InstallerConfig;
use crate::error::{PackmuleError, Result};
use crate::probe::parse_system_path;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand {
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(args: VerifyArgs) -> Self {
        Self { args }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dest = self
            .args
            .dest
            .clone()
            .unwrap_or_else(|| InstallerConfig::default().install_path);

        // Match the installer: the destination directory counts as part
        // of the search path.
        let mut entries = parse_system_path();
        if let Some(parent) = dest.parent() {
            if !entries.iter().any(|e| e.as_path() == parent) {
                entries.push(parent.to_path_buf());
            }
        }

        let report = match verify_install(&dest, &entries, &default_version_probe) {
            Ok(report) => report,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        if self.args.json {
            let output = serde_json::to_string_pretty(&report)
                .map_err(|e| PackmuleError::Other(e.into()))?;
            println!("{}", output);
            return Ok(CommandResult::success());
        }

        ui.success(&format!("{} resolves", report.resolved.display()));
        if !report.executable {
            ui.warning(&format!("{} is not executable", dest.display()));
        }
        if let Some(shadow) = &report.shadowed_by {
            ui.warning(&format!(
                "{} shadows this install earlier on PATH",
                shadow.display()
            ));
        }
        match &report.version {
            Some(version) => ui.message(&format!("Reported version: {}", version)),
            None => ui.message("No version string reported"),
        }

        Ok(CommandResult::success())
    }
}
