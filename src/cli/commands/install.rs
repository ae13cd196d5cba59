//! Install command implementation.
//!
//! The `packmule install` command runs the full pipeline: privilege
//! check, environment and connectivity probes, dependency installs,
//! sensor configuration, download, and verification.

use crate::cli::args::InstallArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::pipeline::InstallPipeline;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    config: InstallerConfig,
}

impl InstallCommand {
    /// Create a new install command from parsed arguments.
    pub fn new(args: InstallArgs) -> Self {
        Self {
            config: config_from_args(&args),
        }
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }
}

/// Overlay CLI arguments onto the default configuration.
///
/// `--dest` alone does not waive the root requirement; only an explicit
/// `--no-root-check` does.
fn config_from_args(args: &InstallArgs) -> InstallerConfig {
    let mut config = InstallerConfig::default();
    if let Some(url) = &args.url {
        config.artifact_url = url.clone();
    }
    if let Some(dest) = &args.dest {
        config.install_path = dest.clone();
    }
    config.assume_yes = args.yes;
    config.strict_network = args.strict_network;
    config.skip_deps = args.skip_deps;
    config.skip_sensors = args.skip_sensors;
    config.force = args.force;
    if args.no_root_check {
        config.require_root = false;
    }
    config
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut pipeline = InstallPipeline::new(self.config.clone());
        match pipeline.run(ui) {
            Ok(()) => Ok(CommandResult::success()),
            Err(e) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(e.exit_code()))
            }
        }
    }
}
