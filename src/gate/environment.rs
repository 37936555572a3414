//! Process preconditions checked before any configuration is loaded.

use crate::config::{parse_bool, HostEnvironment};
use crate::error::{HoardError, Result};

/// Locale variables consulted for the character encoding, highest priority first.
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];

/// Check if running with elevated privileges.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// The effective locale: the first of `LC_ALL`, `LC_CTYPE`, `LANG` that is set
/// and non-empty.
pub fn effective_locale(host: &HostEnvironment) -> Option<&str> {
    LOCALE_VARS
        .iter()
        .filter_map(|key| host.var(key))
        .find(|value| !value.is_empty())
}

/// Whether a locale name selects UTF-8 output.
///
/// The bare `C` and `POSIX` locales are accepted since they impose no
/// encoding of their own.
pub fn is_utf8_locale(locale: &str) -> bool {
    if locale == "C" || locale == "POSIX" {
        return true;
    }
    let codeset = locale
        .split_once('.')
        .map(|(_, rest)| rest.split('@').next().unwrap_or(rest))
        .unwrap_or("");
    let normalized = codeset.to_ascii_lowercase().replace('-', "");
    normalized == "utf8"
}

/// Refuse to run as root unless `ALLOW_ROOT` is true.
pub fn check_not_root(host: &HostEnvironment) -> Result<()> {
    if !host.is_root() {
        return Ok(());
    }
    if host.var("ALLOW_ROOT").is_some_and(parse_bool) {
        tracing::warn!("Running as root because ALLOW_ROOT is set");
        return Ok(());
    }
    Err(HoardError::RunningAsRoot)
}

/// Refuse to run under a non-UTF-8 locale.
pub fn check_locale(host: &HostEnvironment) -> Result<()> {
    match effective_locale(host) {
        Some(locale) if !is_utf8_locale(locale) => Err(HoardError::BadLocale {
            locale: locale.to_string(),
        }),
        _ => Ok(()),
    }
}

/// All process preconditions, in order.
pub fn check_environment(host: &HostEnvironment) -> Result<()> {
    check_not_root(host)?;
    check_locale(host)?;
    tracing::debug!("Environment preconditions satisfied");
    Ok(())
}
