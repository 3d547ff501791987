//! Path policy deciding which requests get measured.
//!
//! The policy is a pure function over a configured list of context paths
//! and a polarity flag. In whitelist mode only the listed contexts are
//! measured; in blacklist mode every context *except* the listed ones is.

/// Allow/deny policy over application context paths.
///
/// Built once at filter initialization and shared read-only between all
/// in-flight requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPolicy {
    contexts: Vec<String>,
    whitelist_mode: bool,
}

impl PathPolicy {
    // ---
    pub fn new(contexts: Vec<String>, whitelist_mode: bool) -> Self {
        // ---
        Self {
            contexts,
            whitelist_mode,
        }
    }

    /// Returns `true` when a request under `context_path` should be measured.
    ///
    /// A matching entry yields `whitelist_mode`; no match yields the inverse.
    /// With an empty context list nothing ever matches, so every request
    /// resolves to `!whitelist_mode`. Under the default whitelist mode that
    /// means nothing is measured until contexts are configured.
    pub fn decide(&self, context_path: &str) -> bool {
        // ---
        if self.matches(context_path) {
            self.whitelist_mode
        } else {
            !self.whitelist_mode
        }
    }

    /// Case-insensitive exact match against the configured contexts.
    ///
    /// Case folding is per character and covers non-ASCII letters. No
    /// trimming happens here; entries are trimmed once at config load.
    pub fn matches(&self, context_path: &str) -> bool {
        // ---
        self.contexts
            .iter()
            .any(|ctx| eq_ignore_case(ctx, context_path))
    }

    pub fn contexts(&self) -> &[String] {
        // ---
        &self.contexts
    }

    pub fn whitelist_mode(&self) -> bool {
        // ---
        self.whitelist_mode
    }
}

/// Char-by-char comparison where a pair is equal if it is identical or
/// agrees after upper- or lower-casing. Lengths must match in chars, so
/// `ß` never equals `SS`.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    // ---
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y || x.to_uppercase().eq(y.to_uppercase()) || x.to_lowercase().eq(y.to_lowercase())
        })
}
