//! Visual theme and styling.

use console::Style;

/// Packmule's visual theme.
#[derive(Debug, Clone)]
pub struct PackmuleTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational/running elements (cyan).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
    /// Style for durations and timestamps (dim).
    pub duration: Style,
}

impl Default for PackmuleTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PackmuleTheme {
    /// Create the default packmule theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            border: Style::new().dim(),
            duration: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            border: Style::new(),
            duration: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▶"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = PackmuleTheme::plain();
        let msg = theme.format_success("Installed");
        assert!(msg.contains("✓"));
        assert!(msg.contains("Installed"));
    }

    #[test]
    fn theme_formats_warning() {
        let theme = PackmuleTheme::plain();
        let msg = theme.format_warning("Low disk space");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Low disk space"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = PackmuleTheme::plain();
        let msg = theme.format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }

    #[test]
    fn theme_formats_skipped() {
        let theme = PackmuleTheme::plain();
        let msg = theme.format_skipped("Skipped");
        assert!(msg.contains("○"));
        assert!(msg.contains("Skipped"));
    }

    #[test]
    fn theme_formats_header() {
        let theme = PackmuleTheme::plain();
        let msg = theme.format_header("packmule");
        assert!(msg.contains("packmule"));
        assert!(msg.contains("▶"));
    }

    #[test]
    fn default_impl_matches_new() {
        let default = PackmuleTheme::default();
        let new = PackmuleTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }

    #[test]
    fn all_slots_usable_in_both_themes() {
        for theme in [PackmuleTheme::new(), PackmuleTheme::plain()] {
            let _ = theme.info.apply_to("probing");
            let _ = theme.border.apply_to("─");
            let _ = theme.duration.apply_to("1.2s");
        }
    }
}
