//! Check command implementation.
//!
//! The `hoard check` command runs every startup gate in order and fails on
//! the first one that does not pass.

use crate::cli::args::CheckArgs;
use crate::config::{ConfigStore, HostEnvironment};
use crate::error::Result;
use crate::gate::{check_data_folder, check_dependencies};
use crate::persistence::{IndexDatabase, PersistenceInitializer};
use crate::ui::{Severity, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::startup::start;

/// The check command implementation.
pub struct CheckCommand<'a> {
    host: &'a HostEnvironment,
    store: &'a ConfigStore,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(host: &'a HostEnvironment, store: &'a ConfigStore, args: CheckArgs) -> Self {
        Self { host, store, args }
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let startup = start(self.host, self.store, ui, Severity::Error)?;

        check_dependencies(&startup.report)?;
        check_data_folder(&startup.config)?;

        if self.args.db {
            let output_dir = &startup.config.output_dir;
            IndexDatabase::new(output_dir).setup(output_dir, true)?;
        }

        let enabled = startup
            .report
            .dependencies
            .iter()
            .filter(|d| d.enabled)
            .count();
        ui.success(&format!(
            "{} dependencies OK, archive found in {}",
            enabled,
            startup.config.output_dir.display()
        ));
        Ok(CommandResult::success())
    }
}
