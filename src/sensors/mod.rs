//! Hardware sensor configuration via lm-sensors.
//!
//! Fresh installs of lm-sensors report nothing until `sensors-detect`
//! has probed the chipset and the kernel modules it selects are loaded.
//! Everything in this module is best-effort: a machine with no readable
//! sensors still produces a hardware report, just without temperatures.

use crate::shell::{run_check, CommandOptions};
use crate::ui::UserInterface;
use std::time::Duration;
use tracing::debug;

/// Result of a `sensors-detect` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectRun {
    pub success: bool,
    pub timed_out: bool,
}

/// What sensor configuration achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorOutcome {
    /// The `sensors` binary is not on PATH (its install likely failed).
    ToolMissing,
    /// Sensors already report temperatures; nothing to do.
    AlreadyConfigured,
    /// Detection ran; modules may or may not have reloaded cleanly.
    Configured { reloaded: bool },
    /// `sensors-detect` failed or timed out.
    DetectFailed,
    /// Skipped by request.
    Skipped,
}

/// Mockable dependencies for sensor configuration.
pub struct SensorContext<'a> {
    /// Is a command resolvable on PATH right now?
    pub command_present: &'a dyn Fn(&str) -> bool,
    /// Capture `sensors` output, None on failure.
    pub read_sensors: &'a dyn Fn() -> Option<String>,
    /// Run `sensors-detect` non-interactively under a timeout.
    pub run_detect: &'a dyn Fn(Duration) -> DetectRun,
    /// Reload kernel modules, returning true on success.
    pub reload_modules: &'a dyn Fn() -> bool,
}

/// Build the default `SensorContext` for production use.
pub fn default_context() -> SensorContext<'static> {
    SensorContext {
        command_present: &|command| {
            crate::probe::command_on_path(command, &crate::probe::parse_system_path())
        },
        read_sensors: &|| {
            crate::shell::run("sensors", &[], &CommandOptions::default())
                .ok()
                .filter(|output| output.success)
                .map(|output| output.stdout)
        },
        run_detect: &|timeout| {
            let options = CommandOptions {
                timeout: Some(timeout),
                ..CommandOptions::default()
            };
            match crate::shell::run("sensors-detect", &["--auto"], &options) {
                Ok(output) => DetectRun {
                    success: output.success,
                    timed_out: output.timed_out,
                },
                Err(_) => DetectRun {
                    success: false,
                    timed_out: false,
                },
            }
        },
        reload_modules: &reload_kernel_modules,
    }
}

/// Does `sensors` output contain actual temperature readings?
pub fn has_temperature_readings(output: &str) -> bool {
    output.contains("°C")
}

/// Configure hardware sensors end to end. Never fatal.
pub fn configure_sensors(
    ctx: &SensorContext<'_>,
    detect_timeout: Duration,
    ui: &mut dyn UserInterface,
) -> SensorOutcome {
    if !(ctx.command_present)("sensors") {
        ui.warning("'sensors' is not available; skipping sensor configuration");
        return SensorOutcome::ToolMissing;
    }

    if let Some(output) = (ctx.read_sensors)() {
        if has_temperature_readings(&output) {
            ui.success("Sensors already report temperatures");
            return SensorOutcome::AlreadyConfigured;
        }
    }

    let mut spinner = ui.start_spinner("Detecting hardware sensors (this can take a minute)");
    let detect = (ctx.run_detect)(detect_timeout);
    debug!(
        "sensors-detect finished: success={} timed_out={}",
        detect.success, detect.timed_out
    );

    if detect.timed_out {
        spinner.finish_error("sensors-detect timed out");
        ui.warning("Sensor detection was killed after the timeout; temperatures may be missing");
        return SensorOutcome::DetectFailed;
    }
    if !detect.success {
        spinner.finish_error("sensors-detect failed");
        ui.warning("Sensor detection failed; temperatures may be missing from the report");
        return SensorOutcome::DetectFailed;
    }
    spinner.finish_success("Sensor detection complete");

    let reloaded = (ctx.reload_modules)();
    if reloaded {
        ui.success("Kernel modules reloaded");
    } else {
        ui.warning("Could not reload kernel modules; new sensors appear after a reboot");
    }

    SensorOutcome::Configured { reloaded }
}

/// Commands tried, in order, to load the modules `sensors-detect` just
/// wrote out. First success wins.
const RELOAD_COMMANDS: &[(&str, &[&str])] = &[
    ("systemctl", &["restart", "systemd-modules-load.service"]),
    ("service", &["kmod", "restart"]),
];

/// Reload kernel modules through whichever service manager responds.
pub fn reload_kernel_modules() -> bool {
    for (program, args) in RELOAD_COMMANDS {
        if run_check(program, args) {
            return true;
        }
    }
    false
}
