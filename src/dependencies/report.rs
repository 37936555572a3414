//! Structured results of dependency resolution.

use std::path::PathBuf;

use serde::Serialize;

use super::probe::ProbeFailure;

/// Resolution outcome for one external binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRecord {
    /// Logical name, e.g. `WGET_BINARY`.
    pub name: &'static str,
    /// The binary as configured (name or path).
    pub binary: String,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
    pub enabled: bool,
    pub is_valid: bool,
}

/// Resolution outcome for one folder or file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderRecord {
    pub name: &'static str,
    pub path: Option<PathBuf>,
    pub enabled: bool,
    pub is_valid: bool,
}

/// Settings handed to the browser when it is launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChromeOptions {
    pub timeout: u64,
    pub resolution: String,
    pub check_ssl_validity: bool,
    pub binary: String,
    pub headless: bool,
    pub sandbox: bool,
    pub user_agent: String,
    pub user_data_dir: Option<PathBuf>,
}

/// Settings handed to wget when it is launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WgetOptions {
    pub binary: String,
    pub version: Option<String>,
    /// Whether this wget understands `--compression=auto`.
    pub auto_compression: bool,
    /// `WGET_USER_AGENT` with its placeholders filled in.
    pub user_agent: String,
}

/// Everything known about the environment after one resolution pass.
///
/// Built once by [`DependencyRegistry::resolve`](super::DependencyRegistry::resolve);
/// consumers only read it.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub dependencies: Vec<DependencyRecord>,
    pub folders: Vec<FolderRecord>,
    pub failures: Vec<ProbeFailure>,
    pub has_invalid_dependencies: bool,
    pub chrome: ChromeOptions,
    pub wget: WgetOptions,
}

impl ResolutionReport {
    /// Look up a dependency by logical name.
    pub fn dependency(&self, name: &str) -> Option<&DependencyRecord> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Look up a folder by logical name.
    pub fn folder(&self, name: &str) -> Option<&FolderRecord> {
        self.folders.iter().find(|f| f.name == name)
    }

    /// Binaries whose probe failed, in the order they were probed.
    pub fn invalid_names(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.binary.clone()).collect()
    }
}
