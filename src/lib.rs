//! Hoard - configuration and dependency resolution for a personal web archiver.
//!
//! Before an archiver can do any work it has to know what it is allowed to
//! do and what it is able to do. Hoard answers both: it reads settings from
//! the environment, switches off features whose tools are disabled, finds
//! and probes the external binaries that remain, and refuses to start when
//! something required is missing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Environment-derived settings and the feature cascade
//! - [`dependencies`] - Binary location, version probes and the resolution report
//! - [`error`] - Error types and result aliases
//! - [`gate`] - Startup preconditions
//! - [`persistence`] - The index storage collaborator
//! - [`ui`] - Themed terminal output and diagnostics
//!
//! # Example
//!
//! ```
//! use hoard::config::{Features, apply_cascade};
//!
//! let mut features = Features {
//!     fetch_favicon: false,
//!     submit_archive_dot_org: false,
//!     ..Features::default()
//! };
//! apply_cascade(&mut features);
//!
//! // nothing left needs curl
//! assert!(!features.use_curl);
//! ```

pub mod cli;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod gate;
pub mod persistence;
pub mod ui;

pub use error::{HoardError, Result};
