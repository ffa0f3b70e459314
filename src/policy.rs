//! Sanitization policy.
//!
//! A [`SanitizePolicy`] is a plain immutable value: build it once (or use
//! [`SanitizePolicy::standard`]) and hand a shared reference to every
//! [`sanitize`](crate::sanitize) call. It is `Send + Sync`, so one policy can
//! serve sanitization passes running on independent documents in parallel.
//!
//! All tag and attribute names are stored lowercase and matched
//! case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use rs_article_sanitizer::SanitizePolicy;
//!
//! let policy = SanitizePolicy::builder()
//!     .whitelist_element("math")
//!     .allow_attributes("abbr", ["title"])
//!     .collapsible("font")
//!     .build();
//!
//! assert!(policy.is_whitelisted("MATH"));
//! assert!(policy.allowed_attributes("abbr").contains("title"));
//! // Table entries always include the default whitelist.
//! assert!(policy.allowed_attributes("abbr").contains("name"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;

static STANDARD: LazyLock<SanitizePolicy> = LazyLock::new(SanitizePolicy::standard_value);

/// Declarative rules for the sanitizing tree walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PolicyConfig", into = "PolicyConfig")]
pub struct SanitizePolicy {
    element_whitelist: BTreeSet<String>,
    attribute_whitelists: BTreeMap<String, BTreeSet<String>>,
    default_attributes: BTreeSet<String>,
    collapsible_tags: BTreeSet<String>,
    preformatted_tag: String,
    line_break_tag: String,
    content_optional: BTreeSet<String>,
}

impl SanitizePolicy {
    /// The process-wide standard policy, initialized on first use.
    ///
    /// - element whitelist: `svg`, `video`, `picture`
    /// - attributes: `a: href`, `img: src alt srcset sizes`,
    ///   `th`/`td: colspan rowspan`, everything else `name`
    /// - collapsible: `span`, `div`
    /// - preformatted: `pre`, line break: `br`
    /// - content-optional: `img`
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    fn standard_value() -> Self {
        Self::builder()
            .whitelist_element("svg")
            .whitelist_element("video")
            .whitelist_element("picture")
            .default_attributes(["name"])
            .allow_attributes("a", ["href"])
            .allow_attributes("img", ["src", "alt", "srcset", "sizes"])
            .allow_attributes("th", ["colspan", "rowspan"])
            .allow_attributes("td", ["colspan", "rowspan"])
            .collapsible("span")
            .collapsible("div")
            .preformatted("pre")
            .line_break("br")
            .content_optional("img")
            .build()
    }

    /// Start an empty policy (`pre`/`br` as preformatted and line-break tags,
    /// nothing else).
    #[must_use]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Load a policy from JSON. Missing fields take the builder defaults.
    ///
    /// ```rust
    /// use rs_article_sanitizer::SanitizePolicy;
    ///
    /// let policy = SanitizePolicy::from_json(r#"{
    ///     "element_whitelist": ["svg"],
    ///     "attribute_whitelists": { "A": ["href"] },
    ///     "default_attributes": ["name"],
    ///     "collapsible_tags": ["span", "div"]
    /// }"#)?;
    /// assert!(policy.allowed_attributes("a").contains("href"));
    /// assert!(policy.allowed_attributes("a").contains("name"));
    /// # Ok::<(), rs_article_sanitizer::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the policy to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Element whose entire subtree is left untouched.
    #[must_use]
    pub fn is_whitelisted(&self, tag: &str) -> bool {
        contains_folded(&self.element_whitelist, tag)
    }

    /// Wrapper element that is unwrapped, its children spliced into its place.
    #[must_use]
    pub fn is_collapsible(&self, tag: &str) -> bool {
        contains_folded(&self.collapsible_tags, tag)
    }

    #[must_use]
    pub fn is_preformatted(&self, tag: &str) -> bool {
        self.preformatted_tag.eq_ignore_ascii_case(tag)
    }

    #[must_use]
    pub fn is_line_break(&self, tag: &str) -> bool {
        self.line_break_tag.eq_ignore_ascii_case(tag)
    }

    /// Element that carries its meaning in attributes and survives being
    /// childless.
    #[must_use]
    pub fn is_content_optional(&self, tag: &str) -> bool {
        contains_folded(&self.content_optional, tag)
    }

    /// Attributes permitted on `tag`: its table entry (which already includes
    /// the defaults) or the default whitelist.
    #[must_use]
    pub fn allowed_attributes(&self, tag: &str) -> &BTreeSet<String> {
        let entry = if tag.bytes().any(|b| b.is_ascii_uppercase()) {
            self.attribute_whitelists.get(&tag.to_ascii_lowercase())
        } else {
            self.attribute_whitelists.get(tag)
        };
        entry.unwrap_or(&self.default_attributes)
    }

    #[must_use]
    pub fn preformatted_tag(&self) -> &str {
        &self.preformatted_tag
    }

    #[must_use]
    pub fn line_break_tag(&self) -> &str {
        &self.line_break_tag
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn contains_folded(set: &BTreeSet<String>, name: &str) -> bool {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        set.contains(&name.to_ascii_lowercase())
    } else {
        set.contains(name)
    }
}

fn fold<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_ascii_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Incremental construction of a [`SanitizePolicy`].
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    config: PolicyConfig,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self {
            config: PolicyConfig {
                element_whitelist: BTreeSet::new(),
                attribute_whitelists: BTreeMap::new(),
                default_attributes: BTreeSet::new(),
                collapsible_tags: BTreeSet::new(),
                preformatted_tag: default_preformatted(),
                line_break_tag: default_line_break(),
                content_optional: BTreeSet::new(),
            },
        }
    }
}

impl PolicyBuilder {
    #[must_use]
    pub fn whitelist_element(mut self, tag: &str) -> Self {
        self.config.element_whitelist.extend(fold([tag]));
        self
    }

    /// Add allowed attributes for one tag (on top of the defaults).
    #[must_use]
    pub fn allow_attributes<I, S>(mut self, tag: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config
            .attribute_whitelists
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .extend(fold(attributes));
        self
    }

    /// Attributes allowed on every tag.
    #[must_use]
    pub fn default_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.default_attributes.extend(fold(attributes));
        self
    }

    #[must_use]
    pub fn collapsible(mut self, tag: &str) -> Self {
        self.config.collapsible_tags.extend(fold([tag]));
        self
    }

    #[must_use]
    pub fn preformatted(mut self, tag: &str) -> Self {
        self.config.preformatted_tag = tag.trim().to_ascii_lowercase();
        self
    }

    #[must_use]
    pub fn line_break(mut self, tag: &str) -> Self {
        self.config.line_break_tag = tag.trim().to_ascii_lowercase();
        self
    }

    #[must_use]
    pub fn content_optional(mut self, tag: &str) -> Self {
        self.config.content_optional.extend(fold([tag]));
        self
    }

    #[must_use]
    pub fn build(self) -> SanitizePolicy {
        SanitizePolicy::from(self.config)
    }
}

/// Serialized shape of a policy. Everything optional on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct PolicyConfig {
    element_whitelist: BTreeSet<String>,
    attribute_whitelists: BTreeMap<String, BTreeSet<String>>,
    default_attributes: BTreeSet<String>,
    collapsible_tags: BTreeSet<String>,
    #[serde(default = "default_preformatted")]
    preformatted_tag: String,
    #[serde(default = "default_line_break")]
    line_break_tag: String,
    content_optional: BTreeSet<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyBuilder::default().config
    }
}

fn default_preformatted() -> String {
    "pre".to_string()
}

fn default_line_break() -> String {
    "br".to_string()
}

impl From<PolicyConfig> for SanitizePolicy {
    fn from(config: PolicyConfig) -> Self {
        let default_attributes = fold(&config.default_attributes);
        let attribute_whitelists = config
            .attribute_whitelists
            .into_iter()
            .map(|(tag, attrs)| {
                let mut allowed = fold(attrs);
                allowed.extend(default_attributes.iter().cloned());
                (tag.trim().to_ascii_lowercase(), allowed)
            })
            .collect();

        Self {
            element_whitelist: fold(config.element_whitelist),
            attribute_whitelists,
            default_attributes,
            collapsible_tags: fold(config.collapsible_tags),
            preformatted_tag: config.preformatted_tag.trim().to_ascii_lowercase(),
            line_break_tag: config.line_break_tag.trim().to_ascii_lowercase(),
            content_optional: fold(config.content_optional),
        }
    }
}

impl From<SanitizePolicy> for PolicyConfig {
    fn from(policy: SanitizePolicy) -> Self {
        Self {
            element_whitelist: policy.element_whitelist,
            attribute_whitelists: policy.attribute_whitelists,
            default_attributes: policy.default_attributes,
            collapsible_tags: policy.collapsible_tags,
            preformatted_tag: policy.preformatted_tag,
            line_break_tag: policy.line_break_tag,
            content_optional: policy.content_optional,
        }
    }
}
