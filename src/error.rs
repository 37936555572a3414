//! Error types for Hoard startup.
//!
//! This module defines [`HoardError`], the error type returned by every
//! fallible startup step, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration and precondition errors are returned as soon as they are
//!   found; continuing past them is meaningless
//! - Dependency probe failures never become a `HoardError` directly. They are
//!   collected into a ledger and only turn into
//!   [`HoardError::InvalidDependencies`] at the dependency gate
//! - Every variant knows how to suggest a remedy, see [`HoardError::remedy`]
//!
//! `main` is the only place that turns an error into a process exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Hoard startup.
#[derive(Debug, Error)]
pub enum HoardError {
    /// An environment value could not be converted to its declared type.
    #[error("Invalid value for {key}: {value:?} (expected {expected})")]
    ConfigParseError {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// A regex-typed setting failed to compile.
    #[error("Invalid pattern in {key}: {message}")]
    PatternCompileError {
        key: String,
        pattern: String,
        message: String,
    },

    /// `CHROME_USER_DATA_DIR` points somewhere without a `Default` profile.
    #[error("Could not find profile \"Default\" in CHROME_USER_DATA_DIR: {}", path.display())]
    ProfileDirMissingDefault {
        path: PathBuf,
        suggestion: Option<PathBuf>,
    },

    /// One or more enabled dependencies failed their probe.
    #[error("Missing some required dependencies: {}", names.join(", "))]
    InvalidDependencies { names: Vec<String> },

    /// The output directory has no archive index.
    #[error("No archive data was found in: {}", path.display())]
    DataFolderMissing { path: PathBuf },

    /// The persistence layer was asked to verify a database that is absent.
    #[error("No database file found in output directory: {}", path.display())]
    DatabaseMissing { path: PathBuf },

    /// The process is running with root privileges.
    #[error("Hoard should never be run as root")]
    RunningAsRoot,

    /// The process locale does not use UTF-8.
    #[error("The system locale is not UTF-8: {locale}")]
    BadLocale { locale: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HoardError {
    /// Suggested corrective steps shown under the error headline.
    pub fn remedy(&self) -> Vec<String> {
        match self {
            HoardError::ConfigParseError { key, .. } => vec![
                "Your archive data is unaffected.".to_string(),
                format!("Check the value of {} in your environment and try again.", key),
                "Run `hoard config` to see every setting and where it came from.".to_string(),
            ],
            HoardError::PatternCompileError { key, pattern, .. } => vec![
                format!("{} must be a valid regular expression, got: {}", key, pattern),
                "Unset it to disable URL filtering.".to_string(),
            ],
            HoardError::ProfileDirMissingDefault { suggestion, .. } => {
                let mut lines = vec![
                    "Make sure you set it to a Chrome user data directory containing a Default profile folder."
                        .to_string(),
                ];
                if let Some(fixed) = suggestion {
                    lines.push(String::new());
                    lines.push("Try removing /Default from the end e.g.:".to_string());
                    lines.push(format!("    CHROME_USER_DATA_DIR=\"{}\"", fixed.display()));
                }
                lines
            }
            HoardError::InvalidDependencies { .. } => vec![
                "Install the missing tools, or disable the features that need them.".to_string(),
                "Run `hoard info` to see which dependencies are enabled.".to_string(),
            ],
            HoardError::DataFolderMissing { .. } => vec![
                "Are you running hoard in the right folder?".to_string(),
                "    cd path/to/your/archive/folder".to_string(),
                "    hoard [command]".to_string(),
                String::new(),
                "To create a new archive collection in this folder, initialize it first."
                    .to_string(),
            ],
            HoardError::DatabaseMissing { .. } => vec![
                "Initialize the archive before running commands that need the index database."
                    .to_string(),
            ],
            HoardError::RunningAsRoot => vec![
                "Archived pages run scripts and write files with your privileges.".to_string(),
                "Re-run as a regular user, or set ALLOW_ROOT=true if you really mean it."
                    .to_string(),
            ],
            HoardError::BadLocale { .. } => vec![
                "Add the line \"export LANG=C.UTF-8\" to your ~/.bashrc file (without quotes)."
                    .to_string(),
                "Or if you're using ubuntu/debian, run \"dpkg-reconfigure locales\".".to_string(),
                String::new(),
                "Confirm that it's fixed by opening a new shell and running:".to_string(),
                "    locale    # LC_CTYPE should mention UTF-8".to_string(),
            ],
            HoardError::Io(_) | HoardError::Other(_) => vec![
                "Your archive data is unaffected.".to_string(),
                "Check your config or environment variables for mistakes and try again."
                    .to_string(),
            ],
        }
    }
}

/// Result type alias for Hoard operations.
pub type Result<T> = std::result::Result<T, HoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_key_and_value() {
        let err = HoardError::ConfigParseError {
            key: "TIMEOUT".into(),
            value: "soon".into(),
            expected: "integer",
        };
        let msg = err.to_string();
        assert!(msg.contains("TIMEOUT"));
        assert!(msg.contains("soon"));
        assert!(msg.contains("integer"));
    }

    #[test]
    fn pattern_compile_error_displays_key() {
        let err = HoardError::PatternCompileError {
            key: "URL_BLACKLIST".into(),
            pattern: "(".into(),
            message: "unclosed group".into(),
        };
        assert!(err.to_string().contains("URL_BLACKLIST"));
        assert!(err.remedy().iter().any(|l| l.contains("(")));
    }

    #[test]
    fn profile_dir_remedy_includes_suggestion() {
        let err = HoardError::ProfileDirMissingDefault {
            path: PathBuf::from("/home/me/.config/chromium/Default"),
            suggestion: Some(PathBuf::from("/home/me/.config/chromium")),
        };
        assert!(err.to_string().contains("/home/me/.config/chromium/Default"));
        let remedy = err.remedy().join("\n");
        assert!(remedy.contains("CHROME_USER_DATA_DIR=\"/home/me/.config/chromium\""));
    }

    #[test]
    fn profile_dir_remedy_without_suggestion() {
        let err = HoardError::ProfileDirMissingDefault {
            path: PathBuf::from("/tmp/profile"),
            suggestion: None,
        };
        assert!(!err.remedy().join("\n").contains("Try removing"));
    }

    #[test]
    fn invalid_dependencies_lists_names() {
        let err = HoardError::InvalidDependencies {
            names: vec!["wget".into(), "git".into()],
        };
        assert!(err.to_string().contains("wget, git"));
    }

    #[test]
    fn data_folder_missing_displays_path() {
        let err = HoardError::DataFolderMissing {
            path: PathBuf::from("/data/archive"),
        };
        assert!(err.to_string().contains("/data/archive"));
        assert!(err.remedy().iter().any(|l| l.contains("right folder")));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HoardError = io_err.into();
        assert!(matches!(err, HoardError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(HoardError::RunningAsRoot)
        }
        assert!(returns_error().is_err());
    }
}
