//! The effective archive configuration.
//!
//! [`ArchiveConfig`] is built once per process from a [`ConfigStore`],
//! with the feature cascade already applied. It is never mutated afterwards;
//! every component that needs a setting receives it by reference.

use std::path::PathBuf;

use regex::Regex;

use super::cascade::Features;
use super::host::HostEnvironment;
use super::store::ConfigStore;
use crate::error::Result;

/// Marker file whose presence means a directory holds an archive.
pub const JSON_INDEX_FILENAME: &str = "index.json";
/// Database file the persistence layer keeps next to the JSON index.
pub const SQL_INDEX_FILENAME: &str = "index.sqlite3";
pub const ARCHIVE_DIR_NAME: &str = "archive";
pub const SOURCES_DIR_NAME: &str = "sources";
pub const LOGS_DIR_NAME: &str = "logs";

pub const DEFAULT_TIMEOUT: u64 = 60;
pub const DEFAULT_MEDIA_TIMEOUT: u64 = 3600;
pub const DEFAULT_OUTPUT_PERMISSIONS: &str = "755";
pub const DEFAULT_FOOTER_INFO: &str = "Content is hosted for personal archiving purposes only.  Contact server owner for any takedown requests.";
pub const DEFAULT_RESOLUTION: &str = "1440,2000";
pub const DEFAULT_GIT_DOMAINS: &str = "github.com,bitbucket.org,gitlab.com";
pub const DEFAULT_WGET_USER_AGENT: &str = "Hoard/{VERSION} wget/{WGET_VERSION}";
pub const DEFAULT_CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/73.0.3683.75 Safari/537.36";

/// How the browser profile directory was configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDirSetting {
    /// `CHROME_USER_DATA_DIR` unset: search the platform default locations.
    Auto,
    /// `CHROME_USER_DATA_DIR` set to the empty string: use no profile.
    Disabled,
    /// An explicit, expanded path supplied by the user.
    Explicit(PathBuf),
}

/// Binary names or paths for each external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySettings {
    pub curl: String,
    pub git: String,
    pub wget: String,
    pub youtubedl: String,
    /// `None` means "search the browser candidate list".
    pub chrome: Option<String>,
}

/// Effective, immutable archive configuration.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub use_color: bool,
    pub show_progress: bool,
    pub only_new: bool,
    pub allow_root: bool,
    pub timeout: u64,
    pub media_timeout: u64,
    pub output_dir: PathBuf,
    pub output_permissions: String,
    pub footer_info: String,
    pub url_blacklist: Option<Regex>,
    /// Feature switches after the cascade.
    pub features: Features,
    pub check_ssl_validity: bool,
    pub resolution: String,
    pub git_domains: Vec<String>,
    /// Raw template; see [`crate::dependencies::WgetOptions`] for the rendered value.
    pub wget_user_agent: String,
    pub cookies_file: Option<PathBuf>,
    pub chrome_user_data_dir: ProfileDirSetting,
    pub chrome_headless: bool,
    pub chrome_sandbox: bool,
    pub chrome_user_agent: String,
    pub binaries: BinarySettings,
    /// Directory containing the running executable. Probes run from here.
    pub install_dir: PathBuf,
}

impl ArchiveConfig {
    /// Build the configuration from a settings snapshot.
    ///
    /// Fails on the first malformed integer or blacklist pattern.
    pub fn load(store: &ConfigStore, host: &HostEnvironment) -> Result<Self> {
        let declared = Features {
            fetch_wget: store.get_bool("FETCH_WGET", true)?,
            fetch_wget_requisites: store.get_bool("FETCH_WGET_REQUISITES", true)?,
            fetch_pdf: store.get_bool("FETCH_PDF", true)?,
            fetch_screenshot: store.get_bool("FETCH_SCREENSHOT", true)?,
            fetch_dom: store.get_bool("FETCH_DOM", true)?,
            fetch_warc: store.get_bool("FETCH_WARC", true)?,
            fetch_git: store.get_bool("FETCH_GIT", true)?,
            fetch_media: store.get_bool("FETCH_MEDIA", true)?,
            fetch_favicon: store.get_bool("FETCH_FAVICON", true)?,
            fetch_title: store.get_bool("FETCH_TITLE", true)?,
            submit_archive_dot_org: store.get_bool("SUBMIT_ARCHIVE_DOT_ORG", true)?,
            use_curl: store.get_bool("USE_CURL", true)?,
            use_wget: store.get_bool("USE_WGET", true)?,
            use_chrome: store.get_bool("USE_CHROME", true)?,
        };

        let chrome_user_data_dir = match store.get_opt_str("CHROME_USER_DATA_DIR")? {
            None => ProfileDirSetting::Auto,
            Some(raw) if raw.is_empty() => ProfileDirSetting::Disabled,
            Some(raw) => ProfileDirSetting::Explicit(store.expand(&raw)),
        };

        let config = Self {
            use_color: store.get_bool("USE_COLOR", host.is_tty())?,
            show_progress: store.get_bool("SHOW_PROGRESS", host.is_tty())?,
            only_new: store.get_bool("ONLY_NEW", false)?,
            allow_root: store.get_bool("ALLOW_ROOT", false)?,
            timeout: store.get_int("TIMEOUT", DEFAULT_TIMEOUT)?,
            media_timeout: store.get_int("MEDIA_TIMEOUT", DEFAULT_MEDIA_TIMEOUT)?,
            output_dir: store
                .get_path("OUTPUT_DIR")?
                .unwrap_or_else(|| store.cwd().to_path_buf()),
            output_permissions: store.get_str("OUTPUT_PERMISSIONS", DEFAULT_OUTPUT_PERMISSIONS)?,
            footer_info: store.get_str("FOOTER_INFO", DEFAULT_FOOTER_INFO)?,
            url_blacklist: store.get_regex("URL_BLACKLIST")?,
            features: declared.cascaded(),
            check_ssl_validity: store.get_bool("CHECK_SSL_VALIDITY", true)?,
            resolution: store.get_str("RESOLUTION", DEFAULT_RESOLUTION)?,
            git_domains: store.get_list("GIT_DOMAINS", DEFAULT_GIT_DOMAINS)?,
            wget_user_agent: store.get_str("WGET_USER_AGENT", DEFAULT_WGET_USER_AGENT)?,
            cookies_file: store.get_path("COOKIES_FILE")?,
            chrome_user_data_dir,
            chrome_headless: store.get_bool("CHROME_HEADLESS", true)?,
            chrome_sandbox: store.get_bool("CHROME_SANDBOX", true)?,
            chrome_user_agent: store.get_str("CHROME_USER_AGENT", DEFAULT_CHROME_USER_AGENT)?,
            binaries: BinarySettings {
                curl: store.get_str("CURL_BINARY", "curl")?,
                git: store.get_str("GIT_BINARY", "git")?,
                wget: store.get_str("WGET_BINARY", "wget")?,
                youtubedl: store.get_str("YOUTUBEDL_BINARY", "youtube-dl")?,
                chrome: store
                    .get_opt_str("CHROME_BINARY")?
                    .filter(|raw| !raw.is_empty()),
            },
            install_dir: host.install_dir().to_path_buf(),
        };

        tracing::debug!(output_dir = %config.output_dir.display(), "Loaded configuration");
        Ok(config)
    }

    /// `<OUTPUT_DIR>/archive`
    pub fn archive_dir(&self) -> PathBuf {
        self.output_dir.join(ARCHIVE_DIR_NAME)
    }

    /// `<OUTPUT_DIR>/sources`
    pub fn sources_dir(&self) -> PathBuf {
        self.output_dir.join(SOURCES_DIR_NAME)
    }

    /// `<OUTPUT_DIR>/logs`
    pub fn logs_dir(&self) -> PathBuf {
        self.output_dir.join(LOGS_DIR_NAME)
    }

    /// `<OUTPUT_DIR>/index.json`
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(JSON_INDEX_FILENAME)
    }

    /// Whether `url` matches `URL_BLACKLIST`.
    pub fn is_blacklisted(&self, url: &str) -> bool {
        self.url_blacklist
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(url))
    }

    /// Every setting as a `(key, display value)` pair, in declaration order.
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        let f = &self.features;
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        let profile = match &self.chrome_user_data_dir {
            ProfileDirSetting::Auto => "(auto)".to_string(),
            ProfileDirSetting::Disabled => String::new(),
            ProfileDirSetting::Explicit(p) => p.display().to_string(),
        };

        vec![
            ("USE_COLOR", self.use_color.to_string()),
            ("SHOW_PROGRESS", self.show_progress.to_string()),
            ("OUTPUT_DIR", self.output_dir.display().to_string()),
            ("ONLY_NEW", self.only_new.to_string()),
            ("TIMEOUT", self.timeout.to_string()),
            ("MEDIA_TIMEOUT", self.media_timeout.to_string()),
            ("OUTPUT_PERMISSIONS", self.output_permissions.clone()),
            ("FOOTER_INFO", self.footer_info.clone()),
            (
                "URL_BLACKLIST",
                self.url_blacklist
                    .as_ref()
                    .map(|r| r.as_str().to_string())
                    .unwrap_or_default(),
            ),
            ("FETCH_WGET", f.fetch_wget.to_string()),
            ("FETCH_WGET_REQUISITES", f.fetch_wget_requisites.to_string()),
            ("FETCH_PDF", f.fetch_pdf.to_string()),
            ("FETCH_SCREENSHOT", f.fetch_screenshot.to_string()),
            ("FETCH_DOM", f.fetch_dom.to_string()),
            ("FETCH_WARC", f.fetch_warc.to_string()),
            ("FETCH_GIT", f.fetch_git.to_string()),
            ("FETCH_MEDIA", f.fetch_media.to_string()),
            ("FETCH_FAVICON", f.fetch_favicon.to_string()),
            ("FETCH_TITLE", f.fetch_title.to_string()),
            ("SUBMIT_ARCHIVE_DOT_ORG", f.submit_archive_dot_org.to_string()),
            ("CHECK_SSL_VALIDITY", self.check_ssl_validity.to_string()),
            ("RESOLUTION", self.resolution.clone()),
            ("GIT_DOMAINS", self.git_domains.join(",")),
            ("WGET_USER_AGENT", self.wget_user_agent.clone()),
            ("COOKIES_FILE", path(&self.cookies_file)),
            ("CHROME_USER_DATA_DIR", profile),
            ("CHROME_HEADLESS", self.chrome_headless.to_string()),
            ("CHROME_USER_AGENT", self.chrome_user_agent.clone()),
            ("CHROME_SANDBOX", self.chrome_sandbox.to_string()),
            ("USE_CURL", f.use_curl.to_string()),
            ("USE_WGET", f.use_wget.to_string()),
            ("USE_CHROME", f.use_chrome.to_string()),
            ("CURL_BINARY", self.binaries.curl.clone()),
            ("GIT_BINARY", self.binaries.git.clone()),
            ("WGET_BINARY", self.binaries.wget.clone()),
            ("YOUTUBEDL_BINARY", self.binaries.youtubedl.clone()),
            (
                "CHROME_BINARY",
                self.binaries.chrome.clone().unwrap_or_else(|| "(auto)".to_string()),
            ),
            ("ALLOW_ROOT", self.allow_root.to_string()),
        ]
    }
}
