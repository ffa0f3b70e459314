//! Compiled regex patterns.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Whitespace
// =============================================================================

/// Runs of two or more whitespace characters (Unicode `White_Space`, so
/// non-breaking spaces count too).
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("WHITESPACE_RUN regex"));

// =============================================================================
// Readability Candidate Patterns
// =============================================================================

/// Class/id fragments that rescue an element from unlikely-candidate removal.
///
/// Same list Readability checks before dropping an unlikely candidate.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|mathjax|shadow")
        .expect("MAYBE_CANDIDATE regex")
});

/// Terms appended to Readability's own unlikely-candidate list by default.
pub const DEFAULT_UNLIKELY_TERMS: &[&str] = &["featured", "trending"];

/// Build a case-insensitive alternation matching any of `terms` literally.
///
/// Returns `None` when there are no non-blank terms.
pub fn alternation(terms: &[String]) -> Result<Option<Regex>, regex::Error> {
    let escaped: Vec<String> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("(?i){}", escaped.join("|"))).map(Some)
}
