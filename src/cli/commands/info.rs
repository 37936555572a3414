//! Info command implementation.
//!
//! The `hoard info` command resolves the environment and shows what it
//! found: key settings, every dependency and every folder.

use serde_json::json;

use crate::cli::args::InfoArgs;
use crate::config::{ConfigStore, HostEnvironment};
use crate::dependencies::{DependencyRecord, FolderRecord};
use crate::error::Result;
use crate::ui::{Severity, Table, Theme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::startup::{start, Startup};

/// The info command implementation.
pub struct InfoCommand<'a> {
    host: &'a HostEnvironment,
    store: &'a ConfigStore,
    args: InfoArgs,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command.
    pub fn new(host: &'a HostEnvironment, store: &'a ConfigStore, args: InfoArgs) -> Self {
        Self { host, store, args }
    }

    fn print_json(&self, startup: &Startup, ui: &mut dyn UserInterface) -> Result<()> {
        let Startup { config, report } = startup;
        let value = json!({
            "version": env!("CARGO_PKG_VERSION"),
            "output_dir": config.output_dir,
            "features": config.features,
            "dependencies": report.dependencies,
            "folders": report.folders,
            "failures": report.failures,
            "has_invalid_dependencies": report.has_invalid_dependencies,
            "chrome": report.chrome,
            "wget": report.wget,
        });
        let rendered = serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?;
        ui.message(&rendered);
        Ok(())
    }

    fn print_tables(&self, startup: &Startup, ui: &mut dyn UserInterface) {
        let Startup { config, report } = startup;
        let theme = ui.theme().clone();

        ui.show_header(&format!("Hoard v{}", env!("CARGO_PKG_VERSION")));
        ui.message(&format!("Output dir: {}", config.output_dir.display()));
        ui.message(&format!("Timeout:    {}s", config.timeout));
        ui.message(&format!(
            "Wget:       {} (compression: {})",
            report.wget.user_agent,
            if report.wget.auto_compression { "auto" } else { "off" }
        ));

        ui.show_header("Dependencies");
        for line in dependency_table(&report.dependencies, &theme) {
            ui.message(&line);
        }

        ui.show_header("Folders");
        for line in folder_table(&report.folders, &theme) {
            ui.message(&line);
        }

        if report.has_invalid_dependencies {
            ui.warning(&format!(
                "Missing dependencies: {} (run `hoard check` for details)",
                report.invalid_names().join(", ")
            ));
        }
    }
}

fn dependency_table(records: &[DependencyRecord], theme: &Theme) -> Vec<String> {
    let mut table = Table::new(&["Name", "Binary", "Version", "Path", "Status"]);
    for record in records {
        table.add_row([
            theme.key.apply_to(record.name).to_string(),
            record.binary.clone(),
            record.version.clone().unwrap_or_default(),
            record
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            theme.format_status(record.enabled, record.is_valid),
        ]);
    }
    table.render(theme)
}

fn folder_table(records: &[FolderRecord], theme: &Theme) -> Vec<String> {
    let mut table = Table::new(&["Name", "Path", "Status"]);
    for record in records {
        table.add_row([
            theme.key.apply_to(record.name).to_string(),
            record
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            theme.format_status(record.enabled, record.is_valid),
        ]);
    }
    table.render(theme)
}

impl Command for InfoCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // info never gates, so broken dependencies are only warnings here
        let startup = start(self.host, self.store, ui, Severity::Warning)?;

        if self.args.json {
            self.print_json(&startup, ui)?;
        } else {
            self.print_tables(&startup, ui);
        }

        Ok(CommandResult::success())
    }
}
