//! Startup gates.
//!
//! Each gate inspects already-resolved state and either lets startup
//! continue or returns the fatal [`HoardError`] for `main` to report.

mod environment;

pub use environment::{
    check_environment, check_locale, check_not_root, effective_locale, is_elevated,
    is_utf8_locale,
};

use crate::config::ArchiveConfig;
use crate::dependencies::ResolutionReport;
use crate::error::{HoardError, Result};

/// Fail if any enabled dependency failed its probe.
pub fn check_dependencies(report: &ResolutionReport) -> Result<()> {
    if report.has_invalid_dependencies {
        return Err(HoardError::InvalidDependencies {
            names: report.invalid_names(),
        });
    }
    Ok(())
}

/// Fail if the output directory holds no archive index.
pub fn check_data_folder(config: &ArchiveConfig) -> Result<()> {
    if !config.index_path().exists() {
        return Err(HoardError::DataFolderMissing {
            path: config.output_dir.clone(),
        });
    }
    Ok(())
}
