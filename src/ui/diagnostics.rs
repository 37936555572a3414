//! User-facing diagnostics for fatal errors and probe failures.
//!
//! A diagnostic is a headline, an optional cause, and a few hint lines.
//! Rendering is separate from construction so tests can assert on content
//! without caring about colour.

use crate::dependencies::ProbeFailure;
use crate::error::HoardError;

use super::theme::Theme;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A structured message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub headline: String,
    pub detail: Option<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn error(headline: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            headline: headline.into(),
            detail: None,
            hints: Vec::new(),
        }
    }

    /// Downgrade to a warning, for problems the caller can live with.
    pub fn into_warning(self) -> Self {
        Self {
            severity: Severity::Warning,
            ..self
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }

    /// Render to output lines.
    pub fn render(&self, theme: &Theme) -> Vec<String> {
        let mut lines = vec![match self.severity {
            Severity::Error => theme.format_error(&self.headline),
            Severity::Warning => theme.format_warning(&self.headline),
        }];

        if let Some(detail) = &self.detail {
            lines.push(format!("    {}", theme.dim.apply_to(detail)));
        }

        for hint in &self.hints {
            if hint.is_empty() {
                lines.push(String::new());
            } else if hint.starts_with("    ") {
                lines.push(format!("    {}", theme.command.apply_to(hint)));
            } else {
                lines.push(format!("    {}", hint));
            }
        }

        lines
    }
}

impl From<&HoardError> for Diagnostic {
    fn from(err: &HoardError) -> Self {
        Diagnostic::error(err.to_string()).with_hints(err.remedy())
    }
}

impl From<&ProbeFailure> for Diagnostic {
    fn from(failure: &ProbeFailure) -> Self {
        Diagnostic::error(failure.to_string())
            .with_detail(failure.reason.clone())
            .with_hints(vec![
                "Make sure it's installed, then confirm it's working by running:".to_string(),
                format!("    {} --version", failure.binary),
                String::new(),
                "If you don't want to install it, disable the features that need it via config."
                    .to_string(),
                "Run `hoard config` to see the current settings.".to_string(),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn probe_failure_names_binary_and_command() {
        let diagnostic = Diagnostic::from(&ProbeFailure::new("wget", "exited with status 2"));
        let output = diagnostic.render(&Theme::plain()).join("\n");

        assert!(output.starts_with("[X] Unable to find working version of dependency: wget"));
        assert!(output.contains("exited with status 2"));
        assert!(output.contains("wget --version"));
        assert!(output.contains("via config"));
    }

    #[test]
    fn error_uses_remedy_as_hints() {
        let err = HoardError::DataFolderMissing {
            path: PathBuf::from("/srv/archive"),
        };
        let diagnostic = Diagnostic::from(&err);

        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.headline.contains("/srv/archive"));
        assert_eq!(diagnostic.hints, err.remedy());
    }

    #[test]
    fn hints_are_indented() {
        let lines = Diagnostic::error("Heads up")
            .into_warning()
            .with_hints(vec!["first".into(), String::new(), "    cmd".into()])
            .render(&Theme::plain());

        assert_eq!(lines, vec!["[!] Heads up", "    first", "", "        cmd"]);
    }
}
