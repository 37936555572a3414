//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use super::{Diagnostic, Theme, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug)]
pub struct MockUI {
    theme: Theme,
    use_color: Option<bool>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    headers: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for MockUI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUI {
    /// Create a new MockUI with the plain theme.
    pub fn new() -> Self {
        Self {
            theme: Theme::plain(),
            use_color: None,
            messages: Vec::new(),
            successes: Vec::new(),
            warnings: Vec::new(),
            headers: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The last value passed to `set_color`, if any.
    pub fn use_color(&self) -> Option<bool> {
        self.use_color
    }

    /// Every stdout line, for substring assertions.
    pub fn stdout(&self) -> String {
        self.messages.join("\n")
    }

    /// Check if any captured output contains the given text.
    pub fn has_output(&self, text: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.headers)
            .any(|line| line.contains(text))
            || self
                .diagnostics
                .iter()
                .any(|d| d.headline.contains(text) || d.hints.iter().any(|h| h.contains(text)))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn set_color(&mut self, use_color: bool) {
        // captured output always stays plain
        self.use_color = Some(use_color);
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}
