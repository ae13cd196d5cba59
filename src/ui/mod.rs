//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - Confirmation prompts, spinners, and the end-of-run summary
//!
//! # Example
//!
//! ```
//! use packmule::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("My App");
//! ui.success("Install complete!");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::confirm_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, PackmuleTheme};

use std::time::Duration;

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question and get the answer.
    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show the end-of-run summary.
    fn show_summary(&mut self, summary: &RunSummary);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// A yes/no question to put to the user.
///
/// The key identifies the question for non-interactive overrides
/// (`PACKMULE_CONFIRM_<KEY>`); the default is what automation and plain
/// enter answer with.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// Unique key for the question (used for env overrides).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer used by default and in non-interactive runs.
    pub default: bool,
}

impl Confirmation {
    pub fn new(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            default,
        }
    }
}

/// Outcome of a single pipeline step, for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Skipped,
}

impl StatusKind {
    /// Plain icon for summary lines.
    pub fn icon(&self) -> &'static str {
        match self {
            StatusKind::Success => "✓",
            StatusKind::Warning => "⚠",
            StatusKind::Skipped => "○",
        }
    }

    /// Themed icon for summary lines.
    pub fn styled(&self, theme: &PackmuleTheme) -> String {
        match self {
            StatusKind::Success => theme.success.apply_to("✓").to_string(),
            StatusKind::Warning => theme.warning.apply_to("⚠").to_string(),
            StatusKind::Skipped => theme.dim.apply_to("○").to_string(),
        }
    }
}

/// One line in the end-of-run summary.
#[derive(Debug, Clone)]
pub struct StepLine {
    pub name: String,
    pub status: StatusKind,
    pub detail: Option<String>,
}

/// Accumulated step outcomes for the end-of-run summary.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub steps: Vec<StepLine>,
    pub total_duration: Duration,
}

impl RunSummary {
    /// Record a step outcome.
    pub fn record(&mut self, name: &str, status: StatusKind, detail: Option<String>) {
        self.steps.push(StepLine {
            name: name.to_string(),
            status,
            detail,
        });
    }

    pub fn warning_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StatusKind::Warning)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StatusKind::Skipped)
            .count()
    }
}

/// Format a duration for display (e.g., "1.2s", "450ms", "2m 5s").
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs < 1 {
        format!("{}ms", duration.as_millis())
    } else if total_secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m {secs}s")
    }
}
