//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing to the real terminal
//! - [`MockUI`] capturing output for tests
//! - [`Theme`], [`Table`] and [`Diagnostic`] rendering helpers
//!
//! # Example
//!
//! ```
//! use hoard::ui::{Diagnostic, MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Resolving dependencies");
//! ui.diagnostic(&Diagnostic::error("wget is missing").into_warning());
//!
//! assert_eq!(ui.messages(), ["Resolving dependencies"]);
//! assert_eq!(ui.diagnostics()[0].headline, "wget is missing");
//! ```

pub mod diagnostics;
pub mod mock;
pub mod table;
pub mod terminal;
pub mod theme;

pub use diagnostics::{Diagnostic, Severity};
pub use mock::MockUI;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a plain line on stdout.
    fn message(&mut self, msg: &str);

    /// Display a success line.
    fn success(&mut self, msg: &str);

    /// Display a warning line.
    fn warning(&mut self, msg: &str);

    /// Show a section header.
    fn show_header(&mut self, title: &str);

    /// Show a structured diagnostic on stderr.
    fn diagnostic(&mut self, diagnostic: &Diagnostic);

    /// Switch between the coloured and plain theme.
    fn set_color(&mut self, use_color: bool);

    /// The active theme, for callers that pre-style cells.
    fn theme(&self) -> &Theme;
}
