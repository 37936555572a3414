//! Snapshot of the process environment Hoard starts in.
//!
//! Everything that the rest of startup would otherwise read from ambient
//! globals (environment variables, working directory, home directory, TTY
//! state, effective user) is captured once here and passed down explicitly.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The host process environment, captured once at startup.
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    vars: HashMap<String, String>,
    cwd: PathBuf,
    home: Option<PathBuf>,
    install_dir: PathBuf,
    is_tty: bool,
    is_root: bool,
}

impl HostEnvironment {
    /// Capture the real process environment.
    pub fn detect() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let install_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| cwd.clone());

        Self {
            vars: unicode_vars(std::env::vars_os()),
            home: dirs::home_dir(),
            install_dir,
            is_tty: console::Term::stdout().is_term(),
            is_root: crate::gate::is_elevated(),
            cwd,
        }
    }

    /// Build an environment from explicit parts (for tests and embedding).
    ///
    /// The result is not a TTY and not root; use the builder methods to
    /// change that.
    pub fn new(vars: HashMap<String, String>, cwd: &Path) -> Self {
        Self {
            vars,
            cwd: cwd.to_path_buf(),
            home: None,
            install_dir: cwd.to_path_buf(),
            is_tty: false,
            is_root: false,
        }
    }

    /// Set the home directory used for `~` expansion.
    pub fn with_home(mut self, home: &Path) -> Self {
        self.home = Some(home.to_path_buf());
        self
    }

    /// Set the install root probes run from.
    pub fn with_install_dir(mut self, dir: &Path) -> Self {
        self.install_dir = dir.to_path_buf();
        self
    }

    /// Mark stdout as a terminal or not.
    pub fn with_tty(mut self, is_tty: bool) -> Self {
        self.is_tty = is_tty;
        self
    }

    /// Mark the process as running with root privileges or not.
    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = is_root;
        self
    }

    /// Look up an environment variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// The executable search path, split into directories.
    pub fn search_path(&self) -> Vec<PathBuf> {
        self.vars
            .get("PATH")
            .map(|path| std::env::split_paths(path).collect())
            .unwrap_or_default()
    }

    /// Working directory at startup.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The user's home directory, if one could be determined.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Directory containing the running executable.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Whether stdout is attached to a terminal.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Whether the process runs with an effective uid of 0.
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

/// Keep the variables whose key and value are both valid Unicode.
///
/// Settings are always text, so a variable that is not can never be one of
/// ours and is skipped.
fn unicode_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                tracing::debug!(key = ?key, "Skipping non-Unicode environment variable");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_reads_from_snapshot() {
        let mut vars = HashMap::new();
        vars.insert("TIMEOUT".to_string(), "30".to_string());
        let host = HostEnvironment::new(vars, Path::new("/work"));

        assert_eq!(host.var("TIMEOUT"), Some("30"));
        assert_eq!(host.var("MISSING"), None);
    }

    #[test]
    fn search_path_splits_path_var() {
        let joined = std::env::join_paths([PathBuf::from("/a/bin"), PathBuf::from("/b/bin")])
            .unwrap()
            .into_string()
            .unwrap();
        let mut vars = HashMap::new();
        vars.insert("PATH".to_string(), joined);
        let host = HostEnvironment::new(vars, Path::new("/work"));

        assert_eq!(
            host.search_path(),
            vec![PathBuf::from("/a/bin"), PathBuf::from("/b/bin")]
        );
    }

    #[test]
    fn search_path_empty_without_path_var() {
        let host = HostEnvironment::new(HashMap::new(), Path::new("/work"));
        assert!(host.search_path().is_empty());
    }

    #[test]
    fn builders_override_defaults() {
        let host = HostEnvironment::new(HashMap::new(), Path::new("/work"))
            .with_home(Path::new("/home/me"))
            .with_install_dir(Path::new("/opt/hoard"))
            .with_tty(true)
            .with_root(true);

        assert_eq!(host.home(), Some(Path::new("/home/me")));
        assert_eq!(host.install_dir(), Path::new("/opt/hoard"));
        assert!(host.is_tty());
        assert!(host.is_root());
        assert_eq!(host.cwd(), Path::new("/work"));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_vars_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = unicode_vars([
            (OsString::from("TIMEOUT"), OsString::from("30")),
            (OsString::from("GARBLED"), OsString::from_vec(b"f\xffo".to_vec())),
            (OsString::from_vec(b"K\xff".to_vec()), OsString::from("v")),
        ]);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("TIMEOUT").map(String::as_str), Some("30"));
    }

    #[test]
    fn detect_captures_working_directory() {
        let host = HostEnvironment::detect();
        assert!(!host.cwd().as_os_str().is_empty());
    }
}
