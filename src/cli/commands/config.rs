//! Config command implementation.
//!
//! The `hoard config` command shows every setting with its effective value
//! and where that value came from. It never probes binaries.

use serde::Serialize;

use crate::cli::args::ConfigArgs;
use crate::config::{ArchiveConfig, ConfigStore, HostEnvironment};
use crate::error::Result;
use crate::gate::check_environment;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// One setting as shown to the user.
#[derive(Debug, Serialize)]
struct SettingRow<'a> {
    key: &'static str,
    value: String,
    source: &'a str,
}

/// The config command implementation.
pub struct ConfigCommand<'a> {
    host: &'a HostEnvironment,
    store: &'a ConfigStore,
    args: ConfigArgs,
}

impl<'a> ConfigCommand<'a> {
    /// Create a new config command.
    pub fn new(host: &'a HostEnvironment, store: &'a ConfigStore, args: ConfigArgs) -> Self {
        Self { host, store, args }
    }

    fn rows(&self, config: &ArchiveConfig) -> Vec<SettingRow<'a>> {
        config
            .settings()
            .into_iter()
            .map(|(key, value)| SettingRow {
                key,
                value,
                source: self.store.source_of(key),
            })
            .collect()
    }
}

impl Command for ConfigCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        check_environment(self.host)?;
        let config = ArchiveConfig::load(self.store, self.host)?;
        ui.set_color(config.use_color);

        let rows = self.rows(&config);

        if self.args.json {
            let rendered = serde_json::to_string_pretty(&rows).map_err(anyhow::Error::from)?;
            ui.message(&rendered);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let mut table = Table::new(&["Setting", "Value", "Source"]);
        for row in &rows {
            table.add_row([
                theme.key.apply_to(row.key).to_string(),
                row.value.clone(),
                theme.dim.apply_to(row.source).to_string(),
            ]);
        }
        for line in table.render(&theme) {
            ui.message(&line);
        }

        Ok(CommandResult::success())
    }
}
