//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, InfoArgs};
use crate::config::{ConfigStore, HostEnvironment};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Fatal startup conditions are returned as errors; `main` turns them
    /// into a diagnostic and exit status 1.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// The process exit status. Codes outside `0..=255` become 1.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    host: HostEnvironment,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given host environment.
    pub fn new(host: HostEnvironment) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &HostEnvironment {
        &self.host
    }

    /// Settings supplied through global flags, which win over the environment.
    pub fn overrides(cli: &Cli) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if cli.no_color {
            overrides.push(("USE_COLOR", "False".to_string()));
        }
        if let Some(dir) = &cli.output_dir {
            overrides.push(("OUTPUT_DIR", dir.display().to_string()));
        }
        overrides
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = ConfigStore::load_with_overrides(&self.host, &Self::overrides(cli));

        match &cli.command {
            Some(Commands::Info(args)) => {
                super::info::InfoCommand::new(&self.host, &store, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(&self.host, &store, args.clone()).execute(ui)
            }
            Some(Commands::Config(args)) => {
                super::config::ConfigCommand::new(&self.host, &store, args.clone()).execute(ui)
            }
            None => {
                // Default to info
                super::info::InfoCommand::new(&self.host, &store, InfoArgs::default()).execute(ui)
            }
        }
    }
}
