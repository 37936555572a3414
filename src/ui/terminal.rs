//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, Diagnostic, Theme, UserInterface};
use crate::config::HostEnvironment;

/// Writes messages to stdout, and warnings and diagnostics to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
}

impl TerminalUI {
    /// Create a terminal UI, coloured if stdout is a terminal.
    pub fn new(host: &HostEnvironment) -> Self {
        let mut ui = Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: Theme::plain(),
        };
        ui.set_color(should_use_colors(host));
        ui
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "\n{}", self.theme.format_header(title)).ok();
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        for line in diagnostic.render(&self.theme) {
            writeln!(self.err, "{}", line).ok();
        }
        writeln!(self.err).ok();
    }

    fn set_color(&mut self, use_color: bool) {
        console::set_colors_enabled(use_color);
        console::set_colors_enabled_stderr(use_color);
        self.theme = Theme::for_color(use_color);
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}
