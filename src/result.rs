//! Result types for extraction output.
//!
//! This module defines the structured output of article extraction: the
//! sanitized content and the document metadata Readability reports.

use serde::{Deserialize, Serialize};

use crate::sanitize::SanitizeReport;

/// Result of extracting the readable article from an HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article title.
    pub title: String,

    /// Author line, if one was found.
    pub byline: Option<String>,

    /// Short description or first paragraph.
    pub excerpt: Option<String>,

    /// Name of the publishing site.
    pub site_name: Option<String>,

    /// Document language (`<html lang>`).
    pub lang: Option<String>,

    /// Text direction (`ltr` / `rtl`).
    pub dir: Option<String>,

    /// Publication time as found in the document.
    pub published_time: Option<String>,

    /// Sanitized article content as HTML.
    pub content: String,

    /// Plain text of the sanitized content.
    pub text_content: String,

    /// Length of `text_content` in characters.
    pub length: usize,

    /// What the sanitizer changed.
    #[serde(skip)]
    pub sanitize_report: SanitizeReport,
}

impl Article {
    /// Whether the sanitized content came out empty.
    ///
    /// An empty article is a valid outcome, not an extraction error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
