//! Configuration options for article extraction.
//!
//! The `Options` struct controls the extraction pipeline around the
//! sanitizer. The sanitizer's own rules live in
//! [`SanitizePolicy`](crate::SanitizePolicy).

use serde::{Deserialize, Serialize};

use crate::patterns::DEFAULT_UNLIKELY_TERMS;

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings. Deserializes from JSON with every field optional.
///
/// # Example
///
/// ```rust
/// use rs_article_sanitizer::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     url: Some("https://example.com/post".to_string()),
///     unlikely_terms: vec!["sponsored".to_string()],
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Source URL of the document.
    ///
    /// Validated before extraction and handed to Readability for resolving
    /// relative links.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Terms added to Readability's unlikely-candidate list.
    ///
    /// Elements whose `class`/`id` contain one of these (and do not look like
    /// a content container) are dropped before article scoring.
    ///
    /// Default: `["featured", "trending"]`
    pub unlikely_terms: Vec<String>,

    /// Maximum number of elements Readability will parse. `0` means no limit.
    ///
    /// Default: `0`
    pub max_elements_to_parse: usize,

    /// Run Readability to locate the article before sanitizing.
    ///
    /// When false (or the `readability` feature is off) the whole `<body>` is
    /// sanitized instead.
    ///
    /// Default: `true`
    pub use_readability: bool,

    /// Collapse whitespace runs in the serialized content once more, outside
    /// preformatted blocks.
    ///
    /// Default: `true`
    pub collapse_output_whitespace: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            unlikely_terms: DEFAULT_UNLIKELY_TERMS.iter().map(|t| (*t).to_string()).collect(),
            max_elements_to_parse: 0,
            use_readability: true,
            collapse_output_whitespace: true,
        }
    }
}

impl Options {
    /// Load options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
