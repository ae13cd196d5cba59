//! Check command implementation.
//!
//! The `packmule check` command reports everything `install` would look
//! at, without changing the host: OS, package manager, disk space,
//! dependency presence, and connectivity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::InstallerConfig;
use crate::error::{PackmuleError, Result};
use crate::net::{check_internet, Connectivity, NetProbes, SystemProbes};
use crate::pm::{PackageManager, PackageManagerKind, DEPENDENCIES};
use crate::probe::{command_on_path, free_space_for, parse_system_path, OsRelease};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// One dependency row in the check report.
#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub command: String,
    pub package: String,
    pub present: bool,
}

/// Snapshot of the host as the installer sees it.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub os: Option<OsRelease>,
    pub package_manager: PackageManagerKind,
    pub package_manager_binary: Option<String>,
    pub free_bytes: Option<u64>,
    pub dependencies: Vec<DependencyCheck>,
    pub connectivity: Connectivity,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    /// Collect the report. Read-only; the only slow part is the
    /// connectivity probe chain.
    pub fn gather(config: &InstallerConfig, probes: &dyn NetProbes) -> Self {
        let path_entries = parse_system_path();
        let manager = PackageManager::detect_in(&path_entries);
        let dependencies = DEPENDENCIES
            .iter()
            .map(|dep| DependencyCheck {
                command: dep.command.to_string(),
                package: dep.package.to_string(),
                present: command_on_path(dep.command, &path_entries),
            })
            .collect();

        Self {
            os: OsRelease::load(),
            package_manager: manager
                .as_ref()
                .map(|m| m.kind)
                .unwrap_or(PackageManagerKind::Unknown),
            package_manager_binary: manager.map(|m| m.binary),
            free_bytes: free_space_for(&config.install_path),
            dependencies,
            connectivity: check_internet(probes),
            checked_at: Utc::now(),
        }
    }
}

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    config: InstallerConfig,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self {
            args,
            config: InstallerConfig::default(),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let probes = SystemProbes::new(
            self.config.probe_connect_timeout,
            self.config.probe_timeout,
        )?;
        let report = CheckReport::gather(&self.config, &probes);

        if self.args.json {
            let output = serde_json::to_string_pretty(&report)
                .map_err(|e| PackmuleError::Other(e.into()))?;
            println!("{}", output);
        } else {
            render_human(&report, ui);
        }

        // A report is not a gate; missing pieces are warnings, not errors.
        Ok(CommandResult::success())
    }
}

fn render_human(report: &CheckReport, ui: &mut dyn UserInterface) {
    ui.show_header("Environment check");

    match &report.os {
        Some(os) => ui.message(&format!("OS: {}", os.display_name())),
        None => ui.message("OS: unknown (no /etc/os-release)"),
    }

    match &report.package_manager_binary {
        Some(binary) => ui.message(&format!(
            "Package manager: {} ({})",
            binary,
            report.package_manager.as_str()
        )),
        None => ui.warning("No supported package manager found"),
    }

    if let Some(free) = report.free_bytes {
        ui.message(&format!("Free space: {} MB", free / (1024 * 1024)));
    }

    for dep in &report.dependencies {
        if dep.present {
            ui.success(&format!("{} present", dep.command));
        } else {
            ui.warning(&format!("{} missing (package {})", dep.command, dep.package));
        }
    }

    match &report.connectivity {
        Connectivity::Verified { .. } => ui.success(&report.connectivity.describe()),
        _ => ui.warning(&report.connectivity.describe()),
    }
}
