//! External dependency resolution.
//!
//! - [`locator`] finds binaries on PATH and browser profiles on disk
//! - [`probe`] asks a binary for its version, bounded by a timeout
//! - [`registry`] runs both over every dependency and builds the report
//! - [`report`] holds the resulting records

pub mod locator;
pub mod probe;
pub mod registry;
pub mod report;

pub use locator::{
    BinaryLocator, CHROME_BINARY_CANDIDATES, CHROME_PROFILE_CANDIDATES, DEFAULT_CHROME_BINARY,
};
pub use probe::{parse_version_line, ProbeFailure, ProbeLedger, VersionProbe, PROBE_TIMEOUT};
pub use registry::{render_wget_user_agent, suggest_profile_dir, DependencyRegistry};
pub use report::{ChromeOptions, DependencyRecord, FolderRecord, ResolutionReport, WgetOptions};
