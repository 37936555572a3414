//! Environment-derived configuration for Hoard.
//!
//! This module handles all aspects of configuration:
//! - Host environment capture in [`host`]
//! - Layered raw values with source tracking in [`env_layer`]
//! - Typed conversion in [`store`]
//! - Feature implication rules in [`cascade`]
//! - The effective configuration object in [`schema`]
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::path::Path;
//! use hoard::config::{ArchiveConfig, ConfigStore, HostEnvironment};
//!
//! let mut vars = HashMap::new();
//! vars.insert("FETCH_PDF".to_string(), "False".to_string());
//! vars.insert("FETCH_SCREENSHOT".to_string(), "False".to_string());
//! vars.insert("FETCH_DOM".to_string(), "False".to_string());
//!
//! let host = HostEnvironment::new(vars, Path::new("/srv/archive"));
//! let store = ConfigStore::load(&host);
//! let config = ArchiveConfig::load(&store, &host).unwrap();
//!
//! // no browser feature is enabled, so the browser itself is switched off
//! assert!(!config.features.use_chrome);
//! assert_eq!(config.output_dir, Path::new("/srv/archive"));
//! ```

pub mod cascade;
pub mod env_layer;
pub mod host;
pub mod schema;
pub mod store;

pub use cascade::{apply as apply_cascade, Features};
pub use env_layer::{EnvLayer, EnvLayerStack, COMMAND_LINE_SOURCE, ENVIRONMENT_SOURCE};
pub use host::HostEnvironment;
pub use schema::{
    ArchiveConfig, BinarySettings, ProfileDirSetting, ARCHIVE_DIR_NAME, JSON_INDEX_FILENAME,
    LOGS_DIR_NAME, SOURCES_DIR_NAME, SQL_INDEX_FILENAME,
};
pub use store::{
    expand_path, parse_bool, ConfigStore, ConfigType, ConfigValue, SETTING_KEYS,
};
