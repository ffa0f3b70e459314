//! Extra "unlikely candidate" terms for article extraction.
//!
//! Readability drops elements whose `class`/`id` look like page chrome
//! (comments, sidebars, footers, ...) before scoring. Its pattern list is
//! fixed inside the extraction crate, so additional terms are applied here,
//! as a pass over the parsed document that runs before Readability sees it,
//! with the same rules Readability uses for its own list:
//!
//! - the element's `class` and `id` joined by a space are tested
//! - a match is ignored when the same string also looks like a content
//!   container ([`MAYBE_CANDIDATE`])
//! - `<body>` and `<a>` are never removed, nor anything inside a `<table>`
//!   or `<code>`

use dom_query::Document;
use regex::Regex;
use tracing::trace;

use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::{alternation, MAYBE_CANDIDATE};

const NEVER_UNLIKELY: &[&str] = &["body", "a"];
const PROTECTING_ANCESTORS: &[&str] = &["table", "code"];

/// Compiled set of extra unlikely-candidate terms.
#[derive(Debug, Clone, Default)]
pub struct UnlikelyCandidates {
    pattern: Option<Regex>,
}

impl UnlikelyCandidates {
    /// Compile the terms. Terms match literally and case-insensitively
    /// anywhere in the class/id string; blank terms are ignored.
    pub fn new(terms: &[String]) -> Result<Self> {
        let pattern = alternation(terms)
            .map_err(|e| Error::InvalidArgument(format!("unlikely candidate terms: {e}")))?;
        Ok(Self { pattern })
    }

    /// No terms configured: [`strip`](Self::strip) is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// Whether an element with this class/id string would be dropped.
    #[must_use]
    pub fn is_unlikely(&self, match_string: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(match_string) && !MAYBE_CANDIDATE.is_match(match_string))
    }

    /// Remove unlikely candidates from `doc`'s body. Returns how many
    /// elements were removed (their subtrees not counted).
    pub fn strip(&self, doc: &Document) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut removed = 0;
        for node in doc.select("body *").nodes().to_vec() {
            let Some(tag) = dom::tag_name(&node) else {
                continue;
            };
            if NEVER_UNLIKELY.contains(&tag.as_str()) {
                continue;
            }

            let class = node.attr("class").unwrap_or_default();
            let id = node.attr("id").unwrap_or_default();
            if class.is_empty() && id.is_empty() {
                continue;
            }
            let match_string = format!("{class} {id}");
            if !self.is_unlikely(&match_string) {
                continue;
            }
            if dom::has_ancestor_tag(&node, PROTECTING_ANCESTORS) || !dom::is_attached(&node) {
                continue;
            }

            trace!(%tag, %match_string, "removing unlikely candidate");
            dom::detach(&node);
            removed += 1;
        }
        removed
    }
}
