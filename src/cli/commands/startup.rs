//! The startup sequence shared by commands that need a resolved environment.

use crate::config::{ArchiveConfig, ConfigStore, HostEnvironment};
use crate::dependencies::{DependencyRegistry, ResolutionReport};
use crate::error::Result;
use crate::gate::check_environment;
use crate::persistence::IndexDatabase;
use crate::ui::{Diagnostic, Severity, UserInterface};

/// Effective configuration and the report resolved from it.
#[derive(Debug)]
pub struct Startup {
    pub config: ArchiveConfig,
    pub report: ResolutionReport,
}

/// Check preconditions, load configuration and resolve dependencies.
///
/// Each probe failure is shown as a diagnostic with the given severity.
/// Whether they are actually fatal is up to the caller.
pub fn start(
    host: &HostEnvironment,
    store: &ConfigStore,
    ui: &mut dyn UserInterface,
    probe_failures: Severity,
) -> Result<Startup> {
    check_environment(host)?;

    let config = ArchiveConfig::load(store, host)?;
    ui.set_color(config.use_color);

    let db = IndexDatabase::new(&config.output_dir);
    let report = DependencyRegistry::for_host(&config, host, &db).resolve()?;

    for failure in &report.failures {
        let diagnostic = Diagnostic::from(failure);
        match probe_failures {
            Severity::Error => ui.diagnostic(&diagnostic),
            Severity::Warning => ui.diagnostic(&diagnostic.into_warning()),
        }
    }

    Ok(Startup { config, report })
}
