//! Hoard CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use hoard::cli::{Cli, CommandDispatcher};
use hoard::config::HostEnvironment;
use hoard::ui::{Diagnostic, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("hoard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hoard=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Hoard starting with args: {:?}", cli);

    let host = HostEnvironment::detect();
    let mut ui = TerminalUI::new(&host);
    if cli.no_color {
        ui.set_color(false);
    }

    let dispatcher = CommandDispatcher::new(host);

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_status()),
        Err(e) => {
            tracing::debug!(error = ?e, "Startup failed");
            ui.diagnostic(&Diagnostic::from(&e));
            ExitCode::from(1)
        }
    }
}
