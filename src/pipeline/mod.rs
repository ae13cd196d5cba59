//! The install pipeline.
//!
//! Runs the fixed sequence: privilege check, environment probe,
//! connectivity check, dependency installs, sensor configuration,
//! artifact download, and post-install verification. Probe, install,
//! and sensor work all go through [`PipelineContext`] so tests can run
//! the whole sequence without touching the host.
//!
//! Step severity is deliberate: missing dependencies and unconfigured
//! sensors degrade the report and are warnings; a failed privilege
//! check, download, or verification makes the install pointless and is
//! fatal.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artifact::{verify_install, FetchOutcome, Fetcher};
use crate::config::InstallerConfig;
use crate::error::{PackmuleError, Result};
use crate::logfile::RunLog;
use crate::net::{check_internet, Connectivity, NetProbes, SystemProbes};
use crate::pm::{install_all, InstallContext, PackageManager};
use crate::probe::{free_space_for, parse_system_path, OsRelease};
use crate::sensors::{configure_sensors, SensorContext, SensorOutcome};
use crate::ui::{Confirmation, RunSummary, StatusKind, UserInterface};

/// Mockable dependencies for a pipeline run.
pub struct PipelineContext<'a> {
    /// Connectivity probes.
    pub probes: &'a dyn NetProbes,
    /// Dependency install hooks.
    pub install: InstallContext<'a>,
    /// Sensor configuration hooks.
    pub sensors: SensorContext<'a>,
    /// Produce the executable search path.
    pub search_path: &'a dyn Fn() -> Vec<PathBuf>,
    /// Are we running with root privileges?
    pub is_elevated: &'a dyn Fn() -> bool,
    /// Fail with `Interrupted` once SIGINT has been seen.
    pub check_interrupt: &'a dyn Fn() -> Result<()>,
    /// Probe the installed script for a version string.
    pub version_probe: &'a dyn Fn(&Path) -> Option<String>,
    /// Run the installed script, returning true on exit 0.
    pub run_artifact: &'a dyn Fn(&Path) -> bool,
}

/// One full install run.
pub struct InstallPipeline {
    config: InstallerConfig,
    log: RunLog,
}

impl InstallPipeline {
    pub fn new(config: InstallerConfig) -> Self {
        let log = RunLog::create(&config.log_dir);
        Self { config, log }
    }

    /// Run the pipeline with production wiring.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let probes = SystemProbes::new(
            self.config.probe_connect_timeout,
            self.config.probe_timeout,
        )?;
        let ctx = PipelineContext {
            probes: &probes,
            install: crate::pm::default_context(),
            sensors: crate::sensors::default_context(),
            search_path: &parse_system_path,
            is_elevated: &crate::shell::is_elevated,
            check_interrupt: &crate::interrupt::check,
            version_probe: &crate::artifact::default_version_probe,
            run_artifact: &run_artifact_now,
        };
        self.run_with(ui, &ctx)
    }

    /// Run the pipeline against an explicit context.
    pub fn run_with(
        &mut self,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
    ) -> Result<()> {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        ui.show_header("sysfetch installer");
        if let Some(path) = self.log.path() {
            ui.message(&format!("Logging to {}", path.display()));
        }
        self.log
            .line(&format!("installing from {}", self.config.artifact_url));

        let outcome = self.run_steps(ui, ctx, &mut summary);
        summary.total_duration = started.elapsed();

        if let Err(e) = outcome {
            self.log.line(&format!("run failed: {}", e));
            return Err(e);
        }

        self.log.line("run complete");
        ui.show_summary(&summary);
        self.offer_run(ui, ctx)
    }

    fn run_steps(
        &mut self,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        (ctx.check_interrupt)()?;
        self.check_root(ctx)?;

        (ctx.check_interrupt)()?;
        let manager = self.probe_environment(ui, ctx, summary);

        (ctx.check_interrupt)()?;
        self.check_network(ui, ctx, summary)?;

        (ctx.check_interrupt)()?;
        self.install_dependencies(manager.as_ref(), ui, ctx, summary);

        (ctx.check_interrupt)()?;
        self.configure_sensors_step(ui, ctx, summary);

        (ctx.check_interrupt)()?;
        self.fetch_artifact(ui, summary)?;

        (ctx.check_interrupt)()?;
        self.verify_artifact(ui, ctx, summary)?;

        Ok(())
    }

    /// Installing to a system path without root fails early, before any
    /// slow network work.
    fn check_root(&mut self, ctx: &PipelineContext<'_>) -> Result<()> {
        if !self.config.require_root {
            return Ok(());
        }
        if (ctx.is_elevated)() {
            return Ok(());
        }
        Err(PackmuleError::Precondition {
            message: format!(
                "root privileges are required to write {}; re-run with sudo, \
                 or pass --no-root-check with a user-writable --dest",
                self.config.install_path.display()
            ),
        })
    }

    fn probe_environment(
        &mut self,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
        summary: &mut RunSummary,
    ) -> Option<PackageManager> {
        let os_name = OsRelease::load()
            .map(|os| os.display_name())
            .unwrap_or_else(|| "unknown Linux".to_string());
        ui.message(&format!("Detected {}", os_name));
        self.log.line(&format!("os: {}", os_name));

        let manager = PackageManager::detect_in(&(ctx.search_path)());
        match &manager {
            Some(m) => {
                ui.message(&format!("Package manager: {}", m.binary));
                self.log.line(&format!("package manager: {}", m.binary));
            }
            None => {
                ui.message("No supported package manager detected");
                self.log.line("package manager: none");
            }
        }

        let mut status = StatusKind::Success;
        if let Some(free) = free_space_for(&self.config.install_path) {
            if free < self.config.min_free_bytes {
                ui.warning(&format!(
                    "Low disk space: {} MB free at the destination",
                    free / (1024 * 1024)
                ));
                status = StatusKind::Warning;
            }
        }

        summary.record("Environment", status, Some(os_name));
        manager
    }

    fn check_network(
        &mut self,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let net = check_internet(ctx.probes);
        self.log.line(&format!("connectivity: {}", net.describe()));

        match net {
            Connectivity::Verified { .. } => {
                ui.success(&net.describe());
                summary.record("Network", StatusKind::Success, None);
                Ok(())
            }
            Connectivity::DnsOnly => {
                ui.warning("DNS resolves but HTTP probes failed; the download may not work");
                summary.record("Network", StatusKind::Warning, Some("DNS only".to_string()));
                Ok(())
            }
            Connectivity::Unreachable => {
                if self.config.strict_network {
                    return Err(PackmuleError::Connectivity {
                        message: "no connectivity probe succeeded".to_string(),
                    });
                }
                if !self.config.assume_yes {
                    let gate = Confirmation::new(
                        "continue_offline",
                        "No network connectivity detected. Try the download anyway?",
                        false,
                    );
                    if !ui.confirm(&gate)? {
                        return Err(PackmuleError::Aborted {
                            message: "no network connectivity".to_string(),
                        });
                    }
                }
                ui.warning("Continuing without verified connectivity");
                summary.record(
                    "Network",
                    StatusKind::Warning,
                    Some("unreachable".to_string()),
                );
                Ok(())
            }
        }
    }

    fn install_dependencies(
        &mut self,
        manager: Option<&PackageManager>,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
        summary: &mut RunSummary,
    ) {
        if self.config.skip_deps {
            ui.message("Skipping dependency installs");
            summary.record("Dependencies", StatusKind::Skipped, None);
            return;
        }

        let Some(manager) = manager else {
            ui.warning(
                "No supported package manager; dependencies must be installed manually",
            );
            summary.record(
                "Dependencies",
                StatusKind::Warning,
                Some("no package manager".to_string()),
            );
            return;
        };

        let report = install_all(manager, &ctx.install, ui);
        self.log.line(&format!(
            "dependencies: {} installed, {} failed",
            report.installed_count(),
            report.failed_count()
        ));

        if report.has_failures() {
            summary.record(
                "Dependencies",
                StatusKind::Warning,
                Some(format!("{} failed", report.failed_count())),
            );
        } else if report.installed_count() > 0 {
            summary.record(
                "Dependencies",
                StatusKind::Success,
                Some(format!("{} installed", report.installed_count())),
            );
        } else {
            summary.record(
                "Dependencies",
                StatusKind::Success,
                Some("all present".to_string()),
            );
        }
    }

    fn configure_sensors_step(
        &mut self,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
        summary: &mut RunSummary,
    ) {
        if self.config.skip_sensors {
            ui.message("Skipping sensor configuration");
            summary.record("Sensors", StatusKind::Skipped, None);
            return;
        }

        let outcome = configure_sensors(&ctx.sensors, self.config.detect_timeout, ui);
        self.log.line(&format!("sensors: {:?}", outcome));

        let (status, detail) = match outcome {
            SensorOutcome::AlreadyConfigured => {
                (StatusKind::Success, Some("already configured".to_string()))
            }
            SensorOutcome::Configured { reloaded: true } => {
                (StatusKind::Success, Some("configured".to_string()))
            }
            SensorOutcome::Configured { reloaded: false } => (
                StatusKind::Warning,
                Some("reboot needed for modules".to_string()),
            ),
            SensorOutcome::ToolMissing => {
                (StatusKind::Warning, Some("sensors unavailable".to_string()))
            }
            SensorOutcome::DetectFailed => {
                (StatusKind::Warning, Some("detection failed".to_string()))
            }
            SensorOutcome::Skipped => (StatusKind::Skipped, None),
        };
        summary.record("Sensors", status, detail);
    }

    fn fetch_artifact(
        &mut self,
        ui: &mut dyn UserInterface,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let mut spinner = ui.start_spinner("Downloading sysfetch");
        let outcome = Fetcher::new(&self.config).fetch_and_install();

        match outcome {
            Ok(FetchOutcome::Installed {
                path,
                sha256,
                bytes,
            }) => {
                spinner.finish_success(&format!("Installed {} ({} bytes)", path.display(), bytes));
                self.log
                    .line(&format!("installed {} sha256={}", path.display(), sha256));
                summary.record(
                    "Download",
                    StatusKind::Success,
                    Some(format!("sha256 {}", &sha256[..12])),
                );
                Ok(())
            }
            Ok(FetchOutcome::AlreadyCurrent { path, sha256 }) => {
                spinner.finish_success(&format!("{} is already up to date", path.display()));
                self.log
                    .line(&format!("already current sha256={}", sha256));
                summary.record(
                    "Download",
                    StatusKind::Success,
                    Some("already current".to_string()),
                );
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Download failed");
                Err(e)
            }
        }
    }

    fn verify_artifact(
        &mut self,
        ui: &mut dyn UserInterface,
        ctx: &PipelineContext<'_>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        // The destination directory counts as part of the search path:
        // a prefix install outside PATH is still a working install.
        let mut entries = (ctx.search_path)();
        if let Some(parent) = self.config.install_path.parent() {
            if !entries.iter().any(|e| e.as_path() == parent) {
                entries.push(parent.to_path_buf());
            }
        }

        let report = verify_install(&self.config.install_path, &entries, ctx.version_probe)?;
        self.log
            .line(&format!("verified: {}", report.resolved.display()));

        let mut status = StatusKind::Success;
        if !report.executable {
            ui.warning(&format!(
                "{} is not executable",
                self.config.install_path.display()
            ));
            status = StatusKind::Warning;
        }
        if let Some(shadow) = &report.shadowed_by {
            ui.warning(&format!(
                "{} shadows the new install earlier on PATH",
                shadow.display()
            ));
            status = StatusKind::Warning;
        }
        if status == StatusKind::Success {
            match &report.version {
                Some(version) => ui.success(&format!(
                    "Verified {} (version {})",
                    report.resolved.display(),
                    version
                )),
                None => ui.success(&format!("Verified {}", report.resolved.display())),
            }
        }

        summary.record("Verify", status, report.version.clone());
        Ok(())
    }

    /// Offer to run the freshly installed script. Interactive sessions
    /// only; `--yes` answers safety gates, not this.
    fn offer_run(&mut self, ui: &mut dyn UserInterface, ctx: &PipelineContext<'_>) -> Result<()> {
        if !ui.is_interactive() {
            return Ok(());
        }

        let offer = Confirmation::new("run_artifact", "Run sysfetch now?", false);
        if ui.confirm(&offer)? {
            self.log.line("running installed script");
            if !(ctx.run_artifact)(&self.config.install_path) {
                ui.warning("sysfetch exited with an error");
            }
        }
        Ok(())
    }
}

/// Run the installed script with inherited stdio.
fn run_artifact_now(path: &Path) -> bool {
    std::process::Command::new(path)
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pm::DEPENDENCIES;
    use crate::sensors::DetectRun;
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    const SCRIPT: &str = "#!/bin/sh\necho sysfetch\n";

    struct StubProbes {
        up: bool,
    }

    impl NetProbes for StubProbes {
        fn http_ok(&self, _url: &str) -> bool {
            self.up
        }
        fn ping_ok(&self, _host: &str) -> bool {
            self.up
        }
        fn resolves(&self, _host: &str) -> bool {
            self.up
        }
    }

    fn test_config(server: &MockServer, temp: &TempDir) -> InstallerConfig {
        InstallerConfig {
            artifact_url: server.url("/sysfetch"),
            install_path: temp.path().join("bin").join("sysfetch"),
            log_dir: temp.path().join("logs"),
            require_root: false,
            skip_deps: true,
            skip_sensors: true,
            ..InstallerConfig::default()
        }
    }

    fn stub_ctx(probes: &StubProbes) -> PipelineContext<'_> {
        PipelineContext {
            probes,
            install: InstallContext {
                command_present: &|_| true,
                run: &|_, _| Some(0),
            },
            sensors: SensorContext {
                command_present: &|_| true,
                read_sensors: &|| Some("Core 0: +40.0°C".to_string()),
                run_detect: &|_| DetectRun {
                    success: true,
                    timed_out: false,
                },
                reload_modules: &|| true,
            },
            search_path: &|| Vec::new(),
            is_elevated: &|| true,
            check_interrupt: &|| Ok(()),
            version_probe: &|_| None,
            run_artifact: &|_| true,
        }
    }

    fn mock_script(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/sysfetch");
            then.status(200).body(SCRIPT);
        })
    }

    #[test]
    fn full_run_installs_and_summarizes() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mock = mock_script(&server);
        let config = test_config(&server, &temp);
        let dest = config.install_path.clone();
        let probes = StubProbes { up: true };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();
        let mut pipeline = InstallPipeline::new(config);

        pipeline.run_with(&mut ui, &ctx).unwrap();

        mock.assert();
        assert!(dest.exists());

        let summary = ui.summaries().last().expect("summary should be shown");
        let names: Vec<&str> = summary.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Environment",
                "Network",
                "Dependencies",
                "Sensors",
                "Download",
                "Verify"
            ]
        );
        assert_eq!(summary.warning_count(), 0);
        assert_eq!(summary.skipped_count(), 2);
    }

    #[test]
    fn run_writes_a_log_file() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let config = test_config(&server, &temp);
        let log_dir = config.log_dir.clone();
        let probes = StubProbes { up: true };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        let entries: Vec<_> = fs::read_dir(&log_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content = fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains("run complete"));
    }

    #[test]
    fn missing_root_fails_before_any_network_work() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mock = mock_script(&server);
        let mut config = test_config(&server, &temp);
        config.require_root = true;
        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);
        ctx.is_elevated = &|| false;
        let mut ui = MockUI::new();

        let err = InstallPipeline::new(config)
            .run_with(&mut ui, &ctx)
            .unwrap_err();

        assert!(matches!(err, PackmuleError::Precondition { .. }));
        assert_eq!(mock.hits(), 0);
        assert!(ui.summaries().is_empty());
    }

    #[test]
    fn offline_with_strict_network_is_fatal() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mut config = test_config(&server, &temp);
        config.strict_network = true;
        let probes = StubProbes { up: false };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();

        let err = InstallPipeline::new(config)
            .run_with(&mut ui, &ctx)
            .unwrap_err();

        assert!(matches!(err, PackmuleError::Connectivity { .. }));
        assert!(ui.confirms_shown().is_empty());
    }

    #[test]
    fn offline_decline_aborts_the_run() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let config = test_config(&server, &temp);
        let dest = config.install_path.clone();
        let probes = StubProbes { up: false };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();

        let err = InstallPipeline::new(config)
            .run_with(&mut ui, &ctx)
            .unwrap_err();

        assert!(matches!(err, PackmuleError::Aborted { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(ui
            .confirms_shown()
            .contains(&"continue_offline".to_string()));
        // Nothing was written besides the run log.
        assert!(!dest.exists());
    }

    #[test]
    fn offline_accept_attempts_the_download() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mock = mock_script(&server);
        let config = test_config(&server, &temp);
        let probes = StubProbes { up: false };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();
        ui.set_confirm_response("continue_offline", true);

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        mock.assert();
        let summary = ui.summaries().last().unwrap();
        assert_eq!(summary.warning_count(), 1);
    }

    #[test]
    fn assume_yes_skips_the_offline_gate() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let mut config = test_config(&server, &temp);
        config.assume_yes = true;
        let probes = StubProbes { up: false };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        assert!(ui.confirms_shown().is_empty());
        assert!(ui.has_warning("without verified connectivity"));
    }

    #[test]
    fn interrupt_stops_the_run_with_130() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mock = mock_script(&server);
        let config = test_config(&server, &temp);
        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);

        // Allow the first two checks, then simulate SIGINT.
        let remaining = Cell::new(2u32);
        let check = || {
            if remaining.get() == 0 {
                return Err(PackmuleError::Interrupted);
            }
            remaining.set(remaining.get() - 1);
            Ok(())
        };
        ctx.check_interrupt = &check;
        let mut ui = MockUI::new();

        let err = InstallPipeline::new(config)
            .run_with(&mut ui, &ctx)
            .unwrap_err();

        assert!(matches!(err, PackmuleError::Interrupted));
        assert_eq!(err.exit_code(), 130);
        assert_eq!(mock.hits(), 0);
    }

    #[test]
    fn dependency_failures_do_not_abort_the_install() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mock = mock_script(&server);
        let mut config = test_config(&server, &temp);
        config.skip_deps = false;

        // A fake apt-get on the search path so detection succeeds.
        let pm_bin = temp.path().join("pmbin");
        fs::create_dir_all(&pm_bin).unwrap();
        fs::write(pm_bin.join("apt-get"), "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(pm_bin.join("apt-get"), fs::Permissions::from_mode(0o755))
                .unwrap();
        }

        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);
        let search = move || vec![pm_bin.clone()];
        ctx.search_path = &search;
        ctx.install = InstallContext {
            command_present: &|_| false,
            run: &|_, _| Some(1),
        };
        let mut ui = MockUI::new();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        mock.assert();
        let summary = ui.summaries().last().unwrap();
        let deps = summary
            .steps
            .iter()
            .find(|s| s.name == "Dependencies")
            .unwrap();
        assert_eq!(deps.status, StatusKind::Warning);
        assert!(ui.has_warning("Could not install"));
    }

    #[test]
    fn fresh_host_installs_every_dependency() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let mock = mock_script(&server);
        let mut config = test_config(&server, &temp);
        config.skip_deps = false;

        let pm_bin = temp.path().join("pmbin");
        fs::create_dir_all(&pm_bin).unwrap();
        fs::write(pm_bin.join("apt-get"), "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(pm_bin.join("apt-get"), fs::Permissions::from_mode(0o755))
                .unwrap();
        }

        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);
        let search = move || vec![pm_bin.clone()];
        ctx.search_path = &search;

        // Nothing present up front; each install makes its command appear.
        let present: RefCell<HashSet<&str>> = RefCell::new(HashSet::new());
        let is_present = |cmd: &str| present.borrow().contains(cmd);
        let install_run = |argv: &[String], _: &[(String, String)]| {
            if argv.get(1).map(String::as_str) == Some("update") {
                return Some(0);
            }
            let package = argv.last().cloned().unwrap_or_default();
            if let Some(dep) = DEPENDENCIES.iter().find(|d| d.package == package) {
                present.borrow_mut().insert(dep.command);
            }
            Some(0)
        };
        ctx.install = InstallContext {
            command_present: &is_present,
            run: &install_run,
        };
        let mut ui = MockUI::new();
        let config_dest = config.install_path.clone();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        mock.assert();
        assert!(config_dest.exists());
        assert_eq!(present.borrow().len(), DEPENDENCIES.len());
        let summary = ui.summaries().last().unwrap();
        let deps = summary
            .steps
            .iter()
            .find(|s| s.name == "Dependencies")
            .unwrap();
        assert_eq!(deps.status, StatusKind::Success);
        assert_eq!(deps.detail.as_deref(), Some("5 installed"));
    }

    #[test]
    fn missing_package_manager_warns_but_continues() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let mut config = test_config(&server, &temp);
        config.skip_deps = false;
        let probes = StubProbes { up: true };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        assert!(ui.has_warning("package manager"));
        let summary = ui.summaries().last().unwrap();
        let deps = summary
            .steps
            .iter()
            .find(|s| s.name == "Dependencies")
            .unwrap();
        assert_eq!(deps.status, StatusKind::Warning);
    }

    #[test]
    fn sensor_failure_is_a_warning_not_an_error() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let mut config = test_config(&server, &temp);
        config.skip_sensors = false;
        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);
        ctx.sensors = SensorContext {
            command_present: &|_| true,
            read_sensors: &|| None,
            run_detect: &|_| DetectRun {
                success: false,
                timed_out: false,
            },
            reload_modules: &|| true,
        };
        let mut ui = MockUI::new();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        let summary = ui.summaries().last().unwrap();
        let sensors = summary.steps.iter().find(|s| s.name == "Sensors").unwrap();
        assert_eq!(sensors.status, StatusKind::Warning);
    }

    #[test]
    fn download_failure_is_fatal() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        server.mock(|when, then| {
            when.method(GET).path("/sysfetch");
            then.status(500).body("boom");
        });
        let config = test_config(&server, &temp);
        let dest = config.install_path.clone();
        let probes = StubProbes { up: true };
        let ctx = stub_ctx(&probes);
        let mut ui = MockUI::new();

        let err = InstallPipeline::new(config)
            .run_with(&mut ui, &ctx)
            .unwrap_err();

        assert!(matches!(err, PackmuleError::Download { .. }));
        assert!(!dest.exists());
        assert!(ui.summaries().is_empty());
    }

    #[test]
    fn second_run_reports_already_current() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let config = test_config(&server, &temp);
        let probes = StubProbes { up: true };
        let ctx = stub_ctx(&probes);

        let mut first_ui = MockUI::new();
        InstallPipeline::new(config.clone())
            .run_with(&mut first_ui, &ctx)
            .unwrap();

        let mut second_ui = MockUI::new();
        InstallPipeline::new(config)
            .run_with(&mut second_ui, &ctx)
            .unwrap();

        let summary = second_ui.summaries().last().unwrap();
        let download = summary.steps.iter().find(|s| s.name == "Download").unwrap();
        assert_eq!(download.detail.as_deref(), Some("already current"));
    }

    #[test]
    fn run_offer_appears_only_in_interactive_sessions() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let config = test_config(&server, &temp);
        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);

        let ran = Cell::new(false);
        let runner = |_: &Path| {
            ran.set(true);
            true
        };
        ctx.run_artifact = &runner;

        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_confirm_response("run_artifact", true);

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        assert!(ran.get());
        assert!(ui.confirms_shown().contains(&"run_artifact".to_string()));
    }

    #[test]
    fn no_run_offer_when_non_interactive() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        mock_script(&server);
        let config = test_config(&server, &temp);
        let probes = StubProbes { up: true };
        let mut ctx = stub_ctx(&probes);

        let ran = Cell::new(false);
        let runner = |_: &Path| {
            ran.set(true);
            true
        };
        ctx.run_artifact = &runner;

        let mut ui = MockUI::new();

        InstallPipeline::new(config).run_with(&mut ui, &ctx).unwrap();

        assert!(!ran.get());
        assert!(!ui.confirms_shown().contains(&"run_artifact".to_string()));
    }
}
