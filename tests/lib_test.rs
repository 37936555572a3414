//! Library integration tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use hoard::config::{ArchiveConfig, ConfigStore, HostEnvironment};
use hoard::dependencies::{BinaryLocator, DependencyRegistry, VersionProbe};
use hoard::gate::{check_data_folder, check_dependencies};
use hoard::persistence::PersistenceInitializer;
use hoard::HoardError;
use tempfile::TempDir;

/// A persistence backend that reports a fixed identity.
struct FakeStore;

impl PersistenceInitializer for FakeStore {
    fn name(&self) -> &str {
        "fake-store"
    }

    fn version(&self) -> Option<String> {
        Some("9.9.9".to_string())
    }

    fn location(&self) -> Option<PathBuf> {
        None
    }

    fn setup(&self, _output_dir: &Path, _check_db: bool) -> hoard::Result<()> {
        Ok(())
    }
}

fn host(dir: &Path, pairs: &[(&str, &str)]) -> HostEnvironment {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    HostEnvironment::new(vars, dir)
}

#[test]
fn error_types_are_public() {
    let err = HoardError::DataFolderMissing {
        path: PathBuf::from("/srv/archive"),
    };
    assert!(err.to_string().contains("/srv/archive"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> hoard::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use hoard::cli::{Cli, Commands};

    let cli = Cli::parse_from(["hoard", "info", "--json"]);
    if let Some(Commands::Info(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Info command");
    }
}

#[test]
fn custom_persistence_feeds_its_record() {
    let temp = TempDir::new().unwrap();
    let host = host(
        temp.path(),
        &[
            ("USE_CURL", "false"),
            ("USE_WGET", "false"),
            ("USE_CHROME", "false"),
            ("FETCH_GIT", "false"),
            ("FETCH_MEDIA", "false"),
        ],
    );
    let config = ArchiveConfig::load(&ConfigStore::load(&host), &host).unwrap();

    let registry = DependencyRegistry::new(
        &config,
        BinaryLocator::new(vec![], temp.path(), None),
        VersionProbe::new(temp.path()),
        &FakeStore,
    );
    let report = registry.resolve().unwrap();

    let record = report.dependency("PERSISTENCE").unwrap();
    assert_eq!(record.binary, "fake-store");
    assert_eq!(record.version.as_deref(), Some("9.9.9"));
    assert!(check_dependencies(&report).is_ok());
}

#[test]
fn gates_report_the_first_problem() {
    let temp = TempDir::new().unwrap();
    let host = host(temp.path(), &[("USE_CHROME", "false"), ("FETCH_GIT", "true")]);
    let config = ArchiveConfig::load(&ConfigStore::load(&host), &host).unwrap();

    let registry = DependencyRegistry::new(
        &config,
        BinaryLocator::new(vec![], temp.path(), None),
        VersionProbe::new(temp.path()),
        &FakeStore,
    );
    let report = registry.resolve().unwrap();

    // curl, wget, git and youtube-dl are enabled but nothing is on PATH
    match check_dependencies(&report).unwrap_err() {
        HoardError::InvalidDependencies { names } => {
            assert_eq!(names, vec!["curl", "wget", "git", "youtube-dl"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        check_data_folder(&config).unwrap_err(),
        HoardError::DataFolderMissing { .. }
    ));
}
