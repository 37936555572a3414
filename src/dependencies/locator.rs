//! Locating external binaries and browser profile directories.
//!
//! Binaries are searched for by iterating over PATH entries directly rather
//! than shelling out to `which`, whose behavior varies across systems.
//! Candidate lists are ordered; the first hit wins. The browser binary list
//! and the browser profile list share the same family order (Chromium,
//! Chrome, Stable, Beta, Canary, Unstable, Dev) so that the profile found
//! belongs to the browser found.
//!
//! Not finding anything is an ordinary outcome and is reported as `None`.

use std::path::{Path, PathBuf};

use crate::config::{expand_path, HostEnvironment};

/// Browser executables in precedence order.
pub const CHROME_BINARY_CANDIDATES: &[&str] = &[
    "chromium-browser",
    "chromium",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "google-chrome",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "google-chrome-stable",
    "google-chrome-beta",
    "google-chrome-canary",
    "/Applications/Google Chrome Canary.app/Contents/MacOS/Google Chrome Canary",
    "google-chrome-unstable",
    "google-chrome-dev",
];

/// Browser user data directories, in the same family order as
/// [`CHROME_BINARY_CANDIDATES`].
pub const CHROME_PROFILE_CANDIDATES: &[&str] = &[
    "~/.config/chromium",
    "~/Library/Application Support/Chromium",
    "~/AppData/Local/Chromium/User Data",
    "~/.config/google-chrome",
    "~/Library/Application Support/Google/Chrome",
    "~/AppData/Local/Google/Chrome/User Data",
    "~/.config/google-chrome-stable",
    "~/.config/google-chrome-beta",
    "~/Library/Application Support/Google/Chrome Canary",
    "~/AppData/Local/Google/Chrome SxS/User Data",
    "~/.config/google-chrome-unstable",
    "~/.config/google-chrome-dev",
];

/// Fallback browser name when nothing is installed.
pub const DEFAULT_CHROME_BINARY: &str = "chromium-browser";

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    path_entries
        .iter()
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Whether a binary setting names a path rather than a bare command name.
fn is_path_like(binary: &str) -> bool {
    binary.starts_with('~') || binary.contains('/') || binary.contains(std::path::MAIN_SEPARATOR)
}

/// Ordered search over PATH and well-known filesystem locations.
#[derive(Debug, Clone)]
pub struct BinaryLocator {
    search_path: Vec<PathBuf>,
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl BinaryLocator {
    /// Create a locator over explicit search directories.
    pub fn new(search_path: Vec<PathBuf>, cwd: &Path, home: Option<&Path>) -> Self {
        Self {
            search_path,
            cwd: cwd.to_path_buf(),
            home: home.map(Path::to_path_buf),
        }
    }

    /// Create a locator from the host's PATH, working directory and home.
    pub fn for_host(host: &HostEnvironment) -> Self {
        Self::new(host.search_path(), host.cwd(), host.home())
    }

    /// Resolve a single binary setting.
    ///
    /// Bare names are searched on PATH. Anything that looks like a path is
    /// `~`-expanded, made absolute, and accepted if it is an executable file.
    pub fn locate(&self, binary: &str) -> Option<PathBuf> {
        if binary.is_empty() {
            return None;
        }

        let found = if is_path_like(binary) {
            let path = expand_path(binary, &self.cwd, self.home.as_deref());
            (path.is_file() && is_executable(&path)).then_some(path)
        } else {
            resolve_tool_path(binary, &self.search_path)
        };

        tracing::debug!(binary = binary, found = ?found, "Located binary");
        found
    }

    /// The first candidate that resolves, with the candidate binary that matched.
    pub fn locate_binary<'c>(&self, candidates: &[&'c str]) -> Option<(&'c str, PathBuf)> {
        candidates
            .iter()
            .find_map(|binary| self.locate(binary).map(|path| (*binary, path)))
    }

    /// The first candidate directory that exists, after `~` expansion.
    pub fn locate_directory(&self, candidates: &[&str]) -> Option<PathBuf> {
        let found = candidates
            .iter()
            .map(|binary| expand_path(binary, &self.cwd, self.home.as_deref()))
            .find(|path| path.is_dir());

        tracing::debug!(found = ?found, "Searched for directory");
        found
    }

    /// The first installed browser, by [`CHROME_BINARY_CANDIDATES`] precedence.
    pub fn find_chrome_binary(&self) -> Option<(&'static str, PathBuf)> {
        self.locate_binary(CHROME_BINARY_CANDIDATES)
    }

    /// The first existing browser profile, by [`CHROME_PROFILE_CANDIDATES`] precedence.
    pub fn find_chrome_data_dir(&self) -> Option<PathBuf> {
        self.locate_directory(CHROME_PROFILE_CANDIDATES)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Create a fake binary at a path (creates parent dirs as needed).
    pub(crate) fn create_fake_binary(path: &Path, script: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    /// Create a non-executable file at a path.
    #[cfg(unix)]
    fn create_non_executable_file(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "not executable").unwrap();
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        create_fake_binary(&dir_a.join("wget"), "exit 0");
        create_fake_binary(&dir_b.join("wget"), "exit 0");

        let result = resolve_tool_path("wget", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_a.join("wget")));
    }

    #[test]
    fn resolve_tool_path_returns_none_when_not_found() {
        let temp = TempDir::new().unwrap();
        let result = resolve_tool_path("wget", &[temp.path().to_path_buf()]);
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        create_non_executable_file(&dir_a.join("git"));
        create_fake_binary(&dir_b.join("git"), "exit 0");

        let result = resolve_tool_path("git", &[dir_a, dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("git")));
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }

    #[test]
    fn locate_binary_respects_candidate_order() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        create_fake_binary(&bin.join("tool-b"), "exit 0");
        create_fake_binary(&bin.join("tool-c"), "exit 0");

        let locator = BinaryLocator::new(vec![bin.clone()], temp.path(), None);
        let found = locator.locate_binary(&["tool-a", "tool-b", "tool-c"]);

        assert_eq!(found, Some(("tool-b", bin.join("tool-b"))));
    }

    #[test]
    fn locate_binary_none_when_nothing_matches() {
        let temp = TempDir::new().unwrap();
        let locator = BinaryLocator::new(vec![temp.path().to_path_buf()], temp.path(), None);
        assert!(locator.locate_binary(&["tool-a", "tool-b"]).is_none());
    }

    #[test]
    fn locate_accepts_explicit_path() {
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("opt/chrome/chrome");
        create_fake_binary(&custom, "exit 0");

        let locator = BinaryLocator::new(vec![], temp.path(), None);
        assert_eq!(locator.locate("opt/chrome/chrome"), Some(custom.clone()));
        assert_eq!(locator.locate(custom.to_str().unwrap()), Some(custom));
    }

    #[test]
    fn locate_expands_home_in_path() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let tool = home.join("bin/youtube-dl");
        create_fake_binary(&tool, "exit 0");

        let locator = BinaryLocator::new(vec![], temp.path(), Some(&home));
        assert_eq!(locator.locate("~/bin/youtube-dl"), Some(tool));
    }

    #[test]
    fn locate_empty_spec_is_none() {
        let locator = BinaryLocator::new(vec![], Path::new("/"), None);
        assert!(locator.locate("").is_none());
    }

    #[test]
    fn chrome_precedence_prefers_chromium() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        create_fake_binary(&bin.join("google-chrome"), "exit 0");
        create_fake_binary(&bin.join("chromium"), "exit 0");
        create_fake_binary(&bin.join("google-chrome-dev"), "exit 0");

        let locator = BinaryLocator::new(vec![bin.clone()], temp.path(), None);
        let (name, path) = locator.find_chrome_binary().unwrap();

        assert_eq!(name, "chromium");
        assert_eq!(path, bin.join("chromium"));
    }

    #[test]
    fn profile_search_follows_family_order() {
        let temp = TempDir::new().unwrap();
        let home = temp.path();
        fs::create_dir_all(home.join(".config/google-chrome-beta")).unwrap();
        fs::create_dir_all(home.join(".config/google-chrome")).unwrap();

        let locator = BinaryLocator::new(vec![], home, Some(home));
        assert_eq!(
            locator.find_chrome_data_dir(),
            Some(home.join(".config/google-chrome"))
        );
    }

    #[test]
    fn profile_search_ignores_files() {
        let temp = TempDir::new().unwrap();
        let home = temp.path();
        fs::create_dir_all(home.join(".config")).unwrap();
        fs::write(home.join(".config/chromium"), "not a dir").unwrap();

        let locator = BinaryLocator::new(vec![], home, Some(home));
        assert!(locator.find_chrome_data_dir().is_none());
    }

    #[test]
    fn candidate_lists_share_family_order() {
        let family = |s: &str| {
            let s = s.to_lowercase();
            if s.contains("chromium") {
                0
            } else if s.contains("canary") || s.contains("sxs") {
                4
            } else if s.contains("unstable") {
                5
            } else if s.contains("stable") {
                2
            } else if s.contains("beta") {
                3
            } else if s.contains("dev") {
                6
            } else {
                1
            }
        };

        let binary_order: Vec<_> = CHROME_BINARY_CANDIDATES.iter().map(|s| family(s)).collect();
        let profile_order: Vec<_> = CHROME_PROFILE_CANDIDATES.iter().map(|s| family(s)).collect();

        assert!(binary_order.windows(2).all(|w| w[0] <= w[1]));
        assert!(profile_order.windows(2).all(|w| w[0] <= w[1]));
    }
}
