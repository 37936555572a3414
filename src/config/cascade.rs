//! Feature implication rules.
//!
//! Each external tool has a master switch (`USE_CURL`, `USE_WGET`,
//! `USE_CHROME`) and a set of features that need it. A tool stays enabled
//! only while at least one of its features is on, and switching the tool off
//! switches all of its features off. Rules are applied in a fixed order and
//! are pure boolean algebra: nothing here touches the filesystem or spawns a
//! process, so disabled tools are never probed.

use serde::Serialize;

/// Fetch toggles and tool master switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Features {
    pub fetch_wget: bool,
    pub fetch_wget_requisites: bool,
    pub fetch_pdf: bool,
    pub fetch_screenshot: bool,
    pub fetch_dom: bool,
    pub fetch_warc: bool,
    pub fetch_git: bool,
    pub fetch_media: bool,
    pub fetch_favicon: bool,
    pub fetch_title: bool,
    pub submit_archive_dot_org: bool,
    pub use_curl: bool,
    pub use_wget: bool,
    pub use_chrome: bool,
}

impl Default for Features {
    /// Everything enabled, matching the environment defaults.
    fn default() -> Self {
        Self {
            fetch_wget: true,
            fetch_wget_requisites: true,
            fetch_pdf: true,
            fetch_screenshot: true,
            fetch_dom: true,
            fetch_warc: true,
            fetch_git: true,
            fetch_media: true,
            fetch_favicon: true,
            fetch_title: true,
            submit_archive_dot_org: true,
            use_curl: true,
            use_wget: true,
            use_chrome: true,
        }
    }
}

impl Features {
    /// Return a copy with every cascade rule applied.
    pub fn cascaded(mut self) -> Self {
        apply(&mut self);
        self
    }
}

/// Apply the implication rules in order: curl, wget, chrome.
///
/// Applying twice gives the same result as applying once.
pub fn apply(features: &mut Features) {
    // curl: favicon, archive.org submission
    if features.use_curl {
        features.use_curl = features.fetch_favicon || features.submit_archive_dot_org;
    } else {
        features.fetch_favicon = false;
        features.submit_archive_dot_org = false;
    }

    // wget: page mirror, WARC
    if features.use_wget {
        features.use_wget = features.fetch_wget || features.fetch_warc;
    } else {
        features.fetch_wget = false;
        features.fetch_warc = false;
    }

    // chrome: pdf, screenshot, dom
    if features.use_chrome {
        features.use_chrome =
            features.fetch_pdf || features.fetch_screenshot || features.fetch_dom;
    } else {
        features.fetch_pdf = false;
        features.fetch_screenshot = false;
        features.fetch_dom = false;
    }

    tracing::debug!(
        use_curl = features.use_curl,
        use_wget = features.use_wget,
        use_chrome = features.use_chrome,
        "Applied feature cascade"
    );
}
