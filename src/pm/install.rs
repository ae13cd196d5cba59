//! Dependency installation for the report script.
//!
//! sysfetch shells out to a handful of inspection tools at runtime. Each
//! one maps to a distro package; missing tools are installed through the
//! detected package manager. A failed install degrades the report but
//! never aborts the run.

use crate::pm::manager::PackageManager;
use crate::probe::{command_on_path, parse_system_path};
use crate::shell::CommandOptions;
use crate::ui::UserInterface;
use tracing::debug;

/// A runtime tool sysfetch calls, and the package that provides it.
#[derive(Debug, Clone, Copy)]
pub struct DependencySpec {
    pub command: &'static str,
    pub package: &'static str,
}

/// Tools the report script invokes. The command name and the package
/// name differ for the PCI/USB listers.
pub const DEPENDENCIES: &[DependencySpec] = &[
    DependencySpec { command: "curl", package: "curl" },
    DependencySpec { command: "dmidecode", package: "dmidecode" },
    DependencySpec { command: "lspci", package: "pciutils" },
    DependencySpec { command: "lsusb", package: "usbutils" },
    DependencySpec { command: "sensors", package: "lm-sensors" },
];

/// What happened to a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyPresent,
    Installed,
    Failed,
}

/// Per-dependency result of an install pass.
#[derive(Debug, Clone)]
pub struct DependencyResult {
    pub command: &'static str,
    pub package: &'static str,
    pub outcome: InstallOutcome,
}

/// Aggregate result of an install pass.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub results: Vec<DependencyResult>,
    pub refreshed: bool,
}

impl InstallReport {
    pub fn installed_count(&self) -> usize {
        self.count(InstallOutcome::Installed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(InstallOutcome::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// Commands that are still missing after the pass.
    pub fn failed_commands(&self) -> Vec<&'static str> {
        self.results
            .iter()
            .filter(|r| r.outcome == InstallOutcome::Failed)
            .map(|r| r.command)
            .collect()
    }

    fn count(&self, outcome: InstallOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Mockable dependencies for the install pass.
pub struct InstallContext<'a> {
    /// Is a command resolvable on PATH right now?
    pub command_present: &'a dyn Fn(&str) -> bool,
    /// Run an argv with extra environment, returning the exit code
    /// (None means spawn failure, signal, or timeout).
    pub run: &'a dyn Fn(&[String], &[(String, String)]) -> Option<i32>,
}

/// Build the default `InstallContext` for production use.
pub fn default_context() -> InstallContext<'static> {
    InstallContext {
        command_present: &|command| command_on_path(command, &parse_system_path()),
        run: &|argv, env| {
            let (program, args) = argv.split_first()?;
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let mut options = CommandOptions::default();
            for (key, value) in env {
                options.env.insert(key.clone(), value.clone());
            }
            crate::shell::run(program, &args, &options)
                .ok()
                .and_then(|output| output.exit_code)
        },
    }
}

/// Install every missing dependency through `manager`.
///
/// The package index is refreshed once, before the first install, and
/// only when something is actually missing. Individual failures are
/// reported and recorded but do not stop the pass.
pub fn install_all(
    manager: &PackageManager,
    ctx: &InstallContext<'_>,
    ui: &mut dyn UserInterface,
) -> InstallReport {
    let mut report = InstallReport::default();

    let missing: Vec<&str> = DEPENDENCIES
        .iter()
        .filter(|dep| !(ctx.command_present)(dep.command))
        .map(|dep| dep.command)
        .collect();

    if !missing.is_empty() {
        report.refreshed = refresh_index(manager, ctx, ui);
    }

    for dep in DEPENDENCIES {
        let outcome = if missing.contains(&dep.command) {
            install_one(dep, manager, ctx, ui)
        } else {
            ui.success(&format!("{} already present", dep.command));
            InstallOutcome::AlreadyPresent
        };
        report.results.push(DependencyResult {
            command: dep.command,
            package: dep.package,
            outcome,
        });
    }

    if report.has_failures() {
        ui.warning(&format!(
            "Could not install: {}. The report will be missing those sections.",
            report.failed_commands().join(", ")
        ));
    }

    report
}

fn refresh_index(
    manager: &PackageManager,
    ctx: &InstallContext<'_>,
    ui: &mut dyn UserInterface,
) -> bool {
    let argv = manager.refresh_args();
    if argv.is_empty() {
        return false;
    }

    let mut spinner = ui.start_spinner("Refreshing package index");
    let code = (ctx.run)(&argv, &manager.env());
    debug!("refresh via {} exited {:?}", manager.binary, code);

    if manager.refresh_ok(code) {
        spinner.finish_success("Package index refreshed");
        true
    } else {
        // Stale metadata usually still resolves these packages.
        spinner.finish_error("Package index refresh failed");
        ui.warning("Continuing with possibly stale package metadata");
        false
    }
}

fn install_one(
    dep: &DependencySpec,
    manager: &PackageManager,
    ctx: &InstallContext<'_>,
    ui: &mut dyn UserInterface,
) -> InstallOutcome {
    let mut spinner = ui.start_spinner(&format!("Installing {} ({})", dep.package, dep.command));
    let argv = manager.install_args(dep.package);
    let code = (ctx.run)(&argv, &manager.env());
    debug!("install {} exited {:?}", dep.package, code);

    if code != Some(0) {
        spinner.finish_error(&format!("Failed to install {}", dep.package));
        return InstallOutcome::Failed;
    }

    // The manager exited 0; make sure the command actually appeared.
    if (ctx.command_present)(dep.command) {
        spinner.finish_success(&format!("{} installed", dep.command));
        InstallOutcome::Installed
    } else {
        spinner.finish_error(&format!(
            "{} installed but '{}' is still missing from PATH",
            dep.package, dep.command
        ));
        InstallOutcome::Failed
    }
}
