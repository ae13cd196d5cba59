//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::PackmuleTheme;
use super::{format_duration, Confirmation, OutputMode, RunSummary, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Confirmations are never shown; the answer comes from a
/// `PACKMULE_CONFIRM_<KEY>` environment override when set, otherwise from
/// the question's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        // Collect PACKMULE_CONFIRM_* env vars
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("PACKMULE_CONFIRM_"))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

fn parse_override(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool> {
        let env_key = format!("PACKMULE_CONFIRM_{}", confirmation.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            if let Some(answer) = parse_override(value) {
                return Ok(answer);
            }
        }

        Ok(confirmation.default)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        println!();
        println!("  ┌─ Summary ──────────────────────────");

        for step in &summary.steps {
            let detail = step.detail.as_deref().unwrap_or("");
            println!("  │ {} {:<20} {}", step.status.icon(), step.name, detail);
        }

        println!("  ├────────────────────────────────────");
        println!(
            "  │ Total: {} · {} warnings · {} skipped",
            format_duration(summary.total_duration),
            summary.warning_count(),
            summary.skipped_count(),
        );
        println!("  └────────────────────────────────────");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that does nothing (for non-interactive mode).
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        let theme = PackmuleTheme::new();
        println!("{}", theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        let theme = PackmuleTheme::new();
        println!("{}", theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        let theme = PackmuleTheme::new();
        println!("{}", theme.format_skipped(msg));
    }
}
