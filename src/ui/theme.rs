//! Visual theme and styling.

use console::Style;

use crate::config::HostEnvironment;

/// Hoard's visual theme.
///
/// Selected once at startup (coloured or plain) and passed to everything
/// that renders user-facing output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for valid/enabled markers (green).
    pub success: Style,
    /// Style for warnings and disabled entries (yellow).
    pub warning: Style,
    /// Style for error headlines (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for section headers (bold).
    pub header: Style,
    /// Style for commands shown in hints (dim italic).
    pub command: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
    /// Style for setting names.
    pub key: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the coloured theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
            key: Style::new().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            command: Style::new(),
            border: Style::new(),
            key: Style::new(),
        }
    }

    /// The coloured theme when `use_color`, otherwise the plain one.
    pub fn for_color(use_color: bool) -> Self {
        if use_color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format an error headline.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("[X] {}", msg)))
    }

    /// Format a warning line.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("[!] {}", msg)))
    }

    /// Format a success line.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("[√] {}", msg)))
    }

    /// Format a section header.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format a validity marker for report tables.
    pub fn format_status(&self, enabled: bool, is_valid: bool) -> String {
        match (enabled, is_valid) {
            (false, _) => format!("{}", self.dim.apply_to("disabled")),
            (true, true) => format!("{}", self.success.apply_to("ok")),
            (true, false) => format!("{}", self.error.apply_to("missing")),
        }
    }
}

/// Check if colors should be enabled when nothing is configured.
pub fn should_use_colors(host: &HostEnvironment) -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if host.var("NO_COLOR").is_some() {
        return false;
    }

    host.is_tty()
}
