//! Version probes for external binaries.
//!
//! A probe runs `<binary> --version` from the install root, reads stdout,
//! and keeps the first three whitespace-separated words of the first line
//! (`GNU Wget 1.20.3 built on linux-gnu.` becomes `GNU Wget 1.20.3`).
//!
//! Every way a probe can go wrong (missing binary, spawn error, non-zero
//! exit, non-UTF-8 output, empty output, timeout) produces the same
//! [`ProbeFailure`]. The reason string is kept for diagnostics only.
//! Failures are collected in a [`ProbeLedger`] instead of being returned as
//! errors, so that every broken dependency is reported in one pass.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use wait_timeout::ChildExt;

/// Argument passed to every binary to ask for its version.
pub const VERSION_FLAG: &str = "--version";

/// Upper bound on how long a single probe may run.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A dependency that could not be validated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Unable to find working version of dependency: {binary}")]
pub struct ProbeFailure {
    /// The binary as configured (name or path).
    pub binary: String,
    /// What went wrong, for logs and diagnostics.
    pub reason: String,
}

impl ProbeFailure {
    pub fn new(binary: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            reason: reason.into(),
        }
    }

    /// The binary could not be found on PATH or at its configured path.
    pub fn not_found(binary: impl Into<String>) -> Self {
        Self::new(binary, "not found")
    }
}

/// Extract the short version string from `--version` output.
///
/// Returns `None` when there is no non-blank first line.
pub fn parse_version_line(stdout: &str) -> Option<String> {
    let first_line = stdout.trim().lines().next()?;
    let version = first_line
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");

    (!version.is_empty()).then_some(version)
}

/// Runs version queries against binaries.
#[derive(Debug, Clone)]
pub struct VersionProbe {
    cwd: PathBuf,
    timeout: Duration,
}

/// Captured result of one bounded child process run.
struct ChildRun {
    success: bool,
    code: Option<i32>,
    stdout: Vec<u8>,
}

impl VersionProbe {
    /// Create a probe that runs binaries from `cwd`.
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            timeout: PROBE_TIMEOUT,
        }
    }

    /// Use a different per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask `binary` for its version.
    pub fn probe(&self, binary: &Path) -> Result<String, ProbeFailure> {
        let label = binary.display().to_string();

        if !binary.is_file() {
            return Err(ProbeFailure::not_found(label));
        }

        let run = self
            .run(binary, &[VERSION_FLAG], true)
            .map_err(|reason| ProbeFailure::new(&label, reason))?;

        if !run.success {
            let reason = match run.code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(ProbeFailure::new(label, reason));
        }

        let stdout = String::from_utf8(run.stdout)
            .map_err(|_| ProbeFailure::new(&label, "output is not valid UTF-8"))?;

        let version = parse_version_line(&stdout)
            .ok_or_else(|| ProbeFailure::new(&label, "printed no version"))?;

        tracing::debug!(binary = %label, version = %version, "Probed version");
        Ok(version)
    }

    /// Whether running `binary` with `args` exits successfully.
    ///
    /// Output is discarded. Used for capability checks such as
    /// `wget --compression=auto --help`.
    pub fn supports(&self, binary: &Path, args: &[&str]) -> bool {
        self.run(binary, args, false)
            .map(|run| run.success)
            .unwrap_or(false)
    }

    fn run(&self, binary: &Path, args: &[&str], capture: bool) -> Result<ChildRun, String> {
        let deadline = Instant::now() + self.timeout;
        let timed_out = || format!("timed out after {}s", self.timeout.as_secs_f32());

        let mut child = Command::new(binary)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(if capture { Stdio::piped() } else { Stdio::null() })
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("failed to start: {}", e))?;

        // Drain stdout on a separate thread so a chatty child cannot block
        // on a full pipe while we wait for it. The pipe may outlive the
        // child when it leaves a background process behind, so the buffer
        // comes back over a channel with its own deadline.
        let stdout = child.stdout.take();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(mut out) = stdout {
                let _ = out.read_to_end(&mut buf);
            }
            let _ = tx.send(buf);
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(timed_out());
            }
            Err(e) => return Err(format!("failed to wait: {}", e)),
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        let stdout = match rx.recv_timeout(remaining) {
            Ok(buf) => buf,
            Err(mpsc::RecvTimeoutError::Timeout) => return Err(timed_out()),
            Err(mpsc::RecvTimeoutError::Disconnected) => Vec::new(),
        };

        Ok(ChildRun {
            success: status.success(),
            code: status.code(),
            stdout,
        })
    }
}

/// Accumulates probe outcomes during one resolution pass.
///
/// Once a failure is recorded, [`has_invalid_dependencies`](Self::has_invalid_dependencies)
/// stays true for the life of the ledger; later successes never clear it.
#[derive(Debug, Clone, Default)]
pub struct ProbeLedger {
    failures: Vec<ProbeFailure>,
}

impl ProbeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a probe outcome, returning the version on success.
    pub fn record(&mut self, outcome: Result<String, ProbeFailure>) -> Option<String> {
        match outcome {
            Ok(version) => Some(version),
            Err(failure) => {
                self.fail(failure);
                None
            }
        }
    }

    /// Record a failure directly.
    pub fn fail(&mut self, failure: ProbeFailure) {
        tracing::warn!(binary = %failure.binary, reason = %failure.reason, "Dependency probe failed");
        self.failures.push(failure);
    }

    /// Whether any probe has failed.
    pub fn has_invalid_dependencies(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failures in the order they were recorded.
    pub fn failures(&self) -> &[ProbeFailure] {
        &self.failures
    }

    /// Consume the ledger, returning its failures.
    pub fn into_failures(self) -> Vec<ProbeFailure> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::locator::tests::create_fake_binary;
    use tempfile::TempDir;

    #[test]
    fn version_is_first_three_tokens_of_first_line() {
        assert_eq!(
            parse_version_line("MyTool 1.2.3 (build abc, extra info, more info)\n"),
            Some("MyTool 1.2.3 (build".to_string())
        );
    }

    #[test]
    fn version_uses_only_first_line() {
        assert_eq!(
            parse_version_line("curl 7.68.0 (x86_64-pc-linux-gnu) libcurl/7.68.0\nRelease-Date: 2020-01-08\n"),
            Some("curl 7.68.0 (x86_64-pc-linux-gnu)".to_string())
        );
    }

    #[test]
    fn version_shorter_than_three_tokens() {
        assert_eq!(parse_version_line("2021.12.17\n"), Some("2021.12.17".to_string()));
    }

    #[test]
    fn version_skips_leading_blank_lines_and_collapses_spaces() {
        assert_eq!(
            parse_version_line("\n\n  git   version\t2.39.2  \n"),
            Some("git version 2.39.2".to_string())
        );
    }

    #[test]
    fn version_empty_output_is_none() {
        assert_eq!(parse_version_line(""), None);
        assert_eq!(parse_version_line("  \n \n"), None);
    }

    #[cfg(unix)]
    #[test]
    fn probe_reads_version_from_stdout() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("mytool");
        create_fake_binary(
            &tool,
            "echo 'MyTool 1.2.3 (build abc, extra info, more info)'",
        );

        let probe = VersionProbe::new(temp.path());
        assert_eq!(probe.probe(&tool).unwrap(), "MyTool 1.2.3 (build");
    }

    #[cfg(unix)]
    #[test]
    fn probe_passes_version_flag_and_cwd() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        std::fs::create_dir_all(&root).unwrap();
        let tool = temp.path().join("echo-args");
        create_fake_binary(&tool, "echo \"args $1 cwd $(basename \"$PWD\")\"");

        let probe = VersionProbe::new(&root);
        assert_eq!(probe.probe(&tool).unwrap(), "args --version cwd");
    }

    #[cfg(unix)]
    #[test]
    fn probe_fails_on_non_zero_exit() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("broken");
        create_fake_binary(&tool, "echo 'Broken 1.0'\nexit 3");

        let failure = VersionProbe::new(temp.path()).probe(&tool).unwrap_err();
        assert!(failure.reason.contains("3"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_fails_on_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("garbled");
        create_fake_binary(&tool, "printf '\\377\\376 1.0\\n'");

        let failure = VersionProbe::new(temp.path()).probe(&tool).unwrap_err();
        assert!(failure.reason.contains("UTF-8"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_fails_on_empty_output() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("silent");
        create_fake_binary(&tool, "exit 0");

        assert!(VersionProbe::new(temp.path()).probe(&tool).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn probe_times_out_hanging_binary() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("hang");
        create_fake_binary(&tool, "exec sleep 30");

        let probe = VersionProbe::new(temp.path()).with_timeout(Duration::from_millis(200));
        let failure = probe.probe(&tool).unwrap_err();
        assert!(failure.reason.contains("timed out"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_times_out_when_background_child_holds_stdout() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("forky");
        create_fake_binary(&tool, "sleep 5 &\necho 'Forky 1.0'");

        let probe = VersionProbe::new(temp.path()).with_timeout(Duration::from_millis(500));
        let started = Instant::now();
        let failure = probe.probe(&tool).unwrap_err();

        assert!(failure.reason.contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn probe_fails_for_missing_binary() {
        let temp = TempDir::new().unwrap();
        let failure = VersionProbe::new(temp.path())
            .probe(&temp.path().join("nope"))
            .unwrap_err();
        assert_eq!(failure.reason, "not found");
    }

    #[cfg(unix)]
    #[test]
    fn supports_reports_exit_status() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("picky");
        create_fake_binary(&tool, "[ \"$1\" = \"--compression=auto\" ]");

        let probe = VersionProbe::new(temp.path());
        assert!(probe.supports(&tool, &["--compression=auto", "--help"]));
        assert!(!probe.supports(&tool, &["--other"]));
        assert!(!probe.supports(&temp.path().join("missing"), &[]));
    }

    #[test]
    fn ledger_flag_is_sticky() {
        let mut ledger = ProbeLedger::new();
        assert!(!ledger.has_invalid_dependencies());

        assert_eq!(ledger.record(Err(ProbeFailure::not_found("wget"))), None);
        assert!(ledger.has_invalid_dependencies());

        assert_eq!(ledger.record(Err(ProbeFailure::new("git", "exited with status 1"))), None);
        assert!(ledger.has_invalid_dependencies());

        assert_eq!(
            ledger.record(Ok("curl 7.68.0 (x86_64)".to_string())),
            Some("curl 7.68.0 (x86_64)".to_string())
        );
        assert!(ledger.has_invalid_dependencies());
        assert_eq!(ledger.failures().len(), 2);
    }

    #[test]
    fn ledger_keeps_failure_order() {
        let mut ledger = ProbeLedger::new();
        ledger.fail(ProbeFailure::not_found("b"));
        ledger.fail(ProbeFailure::not_found("a"));

        let names: Vec<_> = ledger.into_failures().into_iter().map(|f| f.binary).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn failure_display_names_binary() {
        let failure = ProbeFailure::not_found("youtube-dl");
        assert!(failure.to_string().contains("youtube-dl"));
    }
}
