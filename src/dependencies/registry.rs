//! Dependency resolution.
//!
//! [`DependencyRegistry::resolve`] walks every external dependency and every
//! folder the archive relies on, in a fixed order, and produces one
//! [`ResolutionReport`]. Disabled dependencies are neither located nor
//! probed. Probe failures are collected, not returned; the only error that
//! escapes resolution is a user-supplied browser profile directory that has
//! no `Default` profile in it.

use std::path::{Path, PathBuf};

use super::locator::{BinaryLocator, DEFAULT_CHROME_BINARY};
use super::probe::{ProbeFailure, ProbeLedger, VersionProbe};
use super::report::{ChromeOptions, DependencyRecord, FolderRecord, ResolutionReport, WgetOptions};
use crate::config::{ArchiveConfig, HostEnvironment, ProfileDirSetting};
use crate::error::{HoardError, Result};
use crate::persistence::PersistenceInitializer;

/// Name of the profile folder a usable browser user data directory contains.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Arguments that succeed only on wget builds with compression support.
const WGET_COMPRESSION_CHECK: &[&str] = &["--compression=auto", "--help"];

/// Fill in the `{VERSION}` and `{WGET_VERSION}` placeholders of a wget
/// user agent template.
pub fn render_wget_user_agent(template: &str, wget_version: Option<&str>) -> String {
    template
        .replace("{VERSION}", env!("CARGO_PKG_VERSION"))
        .replace("{WGET_VERSION}", wget_version.unwrap_or(""))
}

/// A corrected profile path for users who pointed at the profile itself
/// instead of its parent, e.g. `.../chromium/Default` becomes `.../chromium`.
pub fn suggest_profile_dir(path: &Path) -> Option<PathBuf> {
    let raw = path.to_string_lossy();
    if !raw.contains(DEFAULT_PROFILE_NAME) {
        return None;
    }
    let parent = raw.split("/Default").next().unwrap_or(&raw);
    Some(PathBuf::from(parent))
}

/// Resolves dependencies and folders for one configuration.
pub struct DependencyRegistry<'a> {
    config: &'a ArchiveConfig,
    locator: BinaryLocator,
    probe: VersionProbe,
    persistence: &'a dyn PersistenceInitializer,
}

impl<'a> DependencyRegistry<'a> {
    pub fn new(
        config: &'a ArchiveConfig,
        locator: BinaryLocator,
        probe: VersionProbe,
        persistence: &'a dyn PersistenceInitializer,
    ) -> Self {
        Self {
            config,
            locator,
            probe,
            persistence,
        }
    }

    /// Registry using the host's search path and probing from the install root.
    pub fn for_host(
        config: &'a ArchiveConfig,
        host: &HostEnvironment,
        persistence: &'a dyn PersistenceInitializer,
    ) -> Self {
        Self::new(
            config,
            BinaryLocator::for_host(host),
            VersionProbe::new(&config.install_dir),
            persistence,
        )
    }

    /// Run one full resolution pass.
    pub fn resolve(&self) -> Result<ResolutionReport> {
        let config = self.config;
        let features = &config.features;
        let binaries = &config.binaries;

        // Validate the profile directory before spending time on probes.
        let user_data_dir = self.resolve_profile_dir()?;

        let mut ledger = ProbeLedger::new();
        let mut dependencies = vec![self.runtime_record(), self.persistence_record()];

        dependencies.push(self.binary_record(
            "CURL_BINARY",
            &binaries.curl,
            features.use_curl,
            &mut ledger,
        ));

        let wget = self.binary_record("WGET_BINARY", &binaries.wget, features.use_wget, &mut ledger);
        let auto_compression = match (&wget.path, wget.is_valid) {
            (Some(path), true) => self.probe.supports(path, WGET_COMPRESSION_CHECK),
            _ => false,
        };
        let wget_options = WgetOptions {
            binary: wget.binary.clone(),
            version: wget.version.clone(),
            auto_compression,
            user_agent: render_wget_user_agent(&config.wget_user_agent, wget.version.as_deref()),
        };
        dependencies.push(wget);

        dependencies.push(self.binary_record(
            "GIT_BINARY",
            &binaries.git,
            features.fetch_git,
            &mut ledger,
        ));
        dependencies.push(self.binary_record(
            "YOUTUBEDL_BINARY",
            &binaries.youtubedl,
            features.fetch_media,
            &mut ledger,
        ));

        let chrome_binary = self.chrome_binary();
        let chrome = self.binary_record(
            "CHROME_BINARY",
            &chrome_binary,
            features.use_chrome,
            &mut ledger,
        );
        let chrome_options = ChromeOptions {
            timeout: config.timeout,
            resolution: config.resolution.clone(),
            check_ssl_validity: config.check_ssl_validity,
            binary: chrome
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| chrome.binary.clone()),
            headless: config.chrome_headless,
            sandbox: config.chrome_sandbox,
            user_agent: config.chrome_user_agent.clone(),
            user_data_dir: user_data_dir.clone(),
        };
        dependencies.push(chrome);

        let folders = self.folder_records(user_data_dir);

        let has_invalid_dependencies = ledger.has_invalid_dependencies();
        tracing::debug!(
            dependencies = dependencies.len(),
            folders = folders.len(),
            has_invalid_dependencies,
            "Resolved dependencies"
        );

        Ok(ResolutionReport {
            dependencies,
            folders,
            failures: ledger.into_failures(),
            has_invalid_dependencies,
            chrome: chrome_options,
            wget: wget_options,
        })
    }

    fn runtime_record(&self) -> DependencyRecord {
        DependencyRecord {
            name: "RUNTIME_BINARY",
            binary: env!("CARGO_PKG_NAME").to_string(),
            path: std::env::current_exe().ok(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            enabled: true,
            is_valid: true,
        }
    }

    fn persistence_record(&self) -> DependencyRecord {
        let version = self.persistence.version();
        DependencyRecord {
            name: "PERSISTENCE",
            binary: self.persistence.name().to_string(),
            path: self.persistence.location(),
            is_valid: version.is_some(),
            version,
            enabled: true,
        }
    }

    /// Locate and probe one binary, recording any failure in `ledger`.
    fn binary_record(
        &self,
        name: &'static str,
        binary: &str,
        enabled: bool,
        ledger: &mut ProbeLedger,
    ) -> DependencyRecord {
        let mut record = DependencyRecord {
            name,
            binary: binary.to_string(),
            path: None,
            version: None,
            enabled,
            is_valid: false,
        };

        if !enabled {
            tracing::debug!(dependency = name, "Skipping disabled dependency");
            return record;
        }

        match self.locator.locate(binary) {
            Some(path) => {
                let outcome = self
                    .probe
                    .probe(&path)
                    .map_err(|failure| ProbeFailure::new(binary, failure.reason));
                record.version = ledger.record(outcome);
                record.path = Some(path);
            }
            None => ledger.fail(ProbeFailure::not_found(binary)),
        }

        record.is_valid = record.version.is_some();
        record
    }

    /// The browser to use: configured, else first installed, else the default name.
    fn chrome_binary(&self) -> String {
        if let Some(configured) = &self.config.binaries.chrome {
            return configured.clone();
        }
        if !self.config.features.use_chrome {
            return DEFAULT_CHROME_BINARY.to_string();
        }
        self.locator
            .find_chrome_binary()
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| DEFAULT_CHROME_BINARY.to_string())
    }

    fn resolve_profile_dir(&self) -> Result<Option<PathBuf>> {
        let use_chrome = self.config.features.use_chrome;

        match &self.config.chrome_user_data_dir {
            ProfileDirSetting::Disabled => Ok(None),
            ProfileDirSetting::Auto if use_chrome => Ok(self.locator.find_chrome_data_dir()),
            ProfileDirSetting::Auto => Ok(None),
            ProfileDirSetting::Explicit(path) => {
                if use_chrome && !path.join(DEFAULT_PROFILE_NAME).exists() {
                    return Err(HoardError::ProfileDirMissingDefault {
                        path: path.clone(),
                        suggestion: suggest_profile_dir(path),
                    });
                }
                Ok(Some(path.clone()))
            }
        }
    }

    fn folder_records(&self, user_data_dir: Option<PathBuf>) -> Vec<FolderRecord> {
        let config = self.config;
        let dir = |name: &'static str, path: PathBuf| FolderRecord {
            name,
            is_valid: path.is_dir(),
            path: Some(path),
            enabled: true,
        };

        vec![
            dir("INSTALL_DIR", config.install_dir.clone()),
            FolderRecord {
                name: "OUTPUT_DIR",
                path: Some(config.output_dir.clone()),
                enabled: true,
                is_valid: config.index_path().exists(),
            },
            dir("ARCHIVE_DIR", config.archive_dir()),
            dir("SOURCES_DIR", config.sources_dir()),
            dir("LOGS_DIR", config.logs_dir()),
            FolderRecord {
                name: "CHROME_USER_DATA_DIR",
                enabled: config.features.use_chrome && user_data_dir.is_some(),
                is_valid: user_data_dir
                    .as_ref()
                    .is_some_and(|p| p.join(DEFAULT_PROFILE_NAME).exists()),
                path: user_data_dir,
            },
            FolderRecord {
                name: "COOKIES_FILE",
                path: config.cookies_file.clone(),
                enabled: config.features.use_wget && config.cookies_file.is_some(),
                is_valid: config.cookies_file.as_ref().is_some_and(|p| p.is_file()),
            },
        ]
    }
}
