//! Typed access to environment-derived settings.
//!
//! [`ConfigStore`] snapshots the raw value of every known setting once, then
//! converts on request to one of the [`ConfigType`]s. Conversions are strict
//! for integers and regexes (errors are fatal at load) and deliberately loose
//! for booleans: only the literal `true`, in any case, is true.

use std::path::{Component, Path, PathBuf};

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use super::env_layer::{EnvLayer, EnvLayerStack, COMMAND_LINE_SOURCE, ENVIRONMENT_SOURCE};
use super::host::HostEnvironment;
use crate::error::{HoardError, Result};

/// Every setting Hoard reads from the environment.
pub const SETTING_KEYS: &[&str] = &[
    "USE_COLOR",
    "SHOW_PROGRESS",
    "OUTPUT_DIR",
    "ONLY_NEW",
    "TIMEOUT",
    "MEDIA_TIMEOUT",
    "OUTPUT_PERMISSIONS",
    "FOOTER_INFO",
    "URL_BLACKLIST",
    "FETCH_WGET",
    "FETCH_WGET_REQUISITES",
    "FETCH_PDF",
    "FETCH_SCREENSHOT",
    "FETCH_DOM",
    "FETCH_WARC",
    "FETCH_GIT",
    "FETCH_MEDIA",
    "FETCH_FAVICON",
    "FETCH_TITLE",
    "SUBMIT_ARCHIVE_DOT_ORG",
    "CHECK_SSL_VALIDITY",
    "RESOLUTION",
    "GIT_DOMAINS",
    "WGET_USER_AGENT",
    "COOKIES_FILE",
    "CHROME_USER_DATA_DIR",
    "CHROME_HEADLESS",
    "CHROME_USER_AGENT",
    "CHROME_SANDBOX",
    "USE_CURL",
    "USE_WGET",
    "USE_CHROME",
    "CURL_BINARY",
    "GIT_BINARY",
    "WGET_BINARY",
    "YOUTUBEDL_BINARY",
    "CHROME_BINARY",
    "ALLOW_ROOT",
];

/// Declared type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    Bool,
    Int,
    Str,
    OptStr,
    /// Comma-separated list.
    List,
    /// `~`-expanded absolute path; empty means unset.
    Path,
}

/// A converted setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(u64),
    Str(String),
    OptStr(Option<String>),
    List(Vec<String>),
    Path(Option<PathBuf>),
}

impl ConfigValue {
    pub fn into_bool(self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_int(self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_str(self) -> Option<String> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_opt_str(self) -> Option<Option<String>> {
        match self {
            Self::OptStr(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Option<PathBuf>> {
        match self {
            Self::Path(v) => Some(v),
            _ => None,
        }
    }
}

/// Parse a boolean setting.
///
/// Only `true` in any letter case is true. `1`, `yes` and the empty string
/// are all false.
pub fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Expand a leading `~` and make `raw` absolute against `cwd`.
///
/// `.` and `..` components are resolved lexically, the filesystem is not
/// consulted.
pub fn expand_path(raw: &str, cwd: &Path, home: Option<&Path>) -> PathBuf {
    let expanded = match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    normalize(&absolute)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Raw settings snapshot with typed getters.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    layers: EnvLayerStack,
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl ConfigStore {
    /// Snapshot every key in [`SETTING_KEYS`] from the host environment.
    pub fn load(host: &HostEnvironment) -> Self {
        Self::load_with_overrides(host, &[])
    }

    /// Snapshot the host environment, then apply command-line overrides on top.
    pub fn load_with_overrides(host: &HostEnvironment, overrides: &[(&str, String)]) -> Self {
        let mut env = EnvLayer::new(ENVIRONMENT_SOURCE);
        for key in SETTING_KEYS {
            if let Some(value) = host.var(key) {
                env.set(*key, value);
            }
        }

        let mut flags = EnvLayer::new(COMMAND_LINE_SOURCE);
        for (key, value) in overrides {
            flags.set(*key, value.clone());
        }

        let mut layers = EnvLayerStack::new();
        layers.push(env);
        layers.push(flags);

        tracing::debug!("Loaded settings from {} layer(s)", layers.layer_count());

        Self {
            layers,
            cwd: host.cwd().to_path_buf(),
            home: host.home().map(Path::to_path_buf),
        }
    }

    /// The raw string for `name`, if any layer sets it.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.layers.get(name)
    }

    /// Where `name` was set: `environment`, `command line`, or `default`.
    pub fn source_of(&self, name: &str) -> &str {
        self.layers.source_of(name).unwrap_or("default")
    }

    /// Get `name` converted to `ty`, using `default` when unset.
    ///
    /// For [`ConfigType::OptStr`] and [`ConfigType::Path`] an empty
    /// `default` means "no value".
    pub fn get(&self, name: &str, ty: ConfigType, default: &str) -> Result<ConfigValue> {
        let raw = self.raw(name);
        let value = raw.unwrap_or(default);

        Ok(match ty {
            ConfigType::Bool => ConfigValue::Bool(parse_bool(value)),
            ConfigType::Int => ConfigValue::Int(parse_int(name, value)?),
            ConfigType::Str => ConfigValue::Str(value.to_string()),
            ConfigType::OptStr => ConfigValue::OptStr(match raw {
                Some(raw) => Some(raw.to_string()),
                None if default.is_empty() => None,
                None => Some(default.to_string()),
            }),
            ConfigType::List => ConfigValue::List(split_list(value)),
            ConfigType::Path => ConfigValue::Path(if value.is_empty() {
                None
            } else {
                Some(expand_path(value, &self.cwd, self.home.as_deref()))
            }),
        })
    }

    /// Boolean setting.
    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool> {
        let default = if default { "True" } else { "False" };
        self.get_as(name, ConfigType::Bool, default, ConfigValue::into_bool)
    }

    /// Non-negative integer setting.
    pub fn get_int(&self, name: &str, default: u64) -> Result<u64> {
        self.get_as(name, ConfigType::Int, &default.to_string(), ConfigValue::into_int)
    }

    /// String setting.
    pub fn get_str(&self, name: &str, default: &str) -> Result<String> {
        self.get_as(name, ConfigType::Str, default, ConfigValue::into_str)
    }

    /// Optional string setting. An empty string is returned as `Some("")`.
    pub fn get_opt_str(&self, name: &str) -> Result<Option<String>> {
        self.get_as(name, ConfigType::OptStr, "", ConfigValue::into_opt_str)
    }

    /// Comma-separated list setting.
    pub fn get_list(&self, name: &str, default: &str) -> Result<Vec<String>> {
        self.get_as(name, ConfigType::List, default, ConfigValue::into_list)
    }

    /// Path setting, expanded and absolute. Unset and empty both give `None`.
    pub fn get_path(&self, name: &str) -> Result<Option<PathBuf>> {
        self.get_as(name, ConfigType::Path, "", ConfigValue::into_path)
    }

    fn get_as<T>(
        &self,
        name: &str,
        ty: ConfigType,
        default: &str,
        extract: fn(ConfigValue) -> Option<T>,
    ) -> Result<T> {
        let value = self.get(name, ty, default)?;
        extract(value)
            .ok_or_else(|| anyhow::anyhow!("{} did not convert to {:?}", name, ty).into())
    }

    /// Case-insensitive regex setting, compiled once. Unset and empty give `None`.
    pub fn get_regex(&self, name: &str) -> Result<Option<Regex>> {
        let Some(pattern) = self.raw(name).filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };

        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|e| HoardError::PatternCompileError {
                key: name.to_string(),
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Expand a path the same way path settings are expanded.
    pub fn expand(&self, raw: &str) -> PathBuf {
        expand_path(raw, &self.cwd, self.home.as_deref())
    }

    /// The working directory relative paths are resolved against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

fn parse_int(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| HoardError::ConfigParseError {
            key: name.to_string(),
            value: raw.to_string(),
            expected: "integer",
        })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
