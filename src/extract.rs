//! Article extraction pipeline.
//!
//! 1. Validate the source URL and parse the HTML
//! 2. Drop extra unlikely candidates ([`UnlikelyCandidates`])
//! 3. Locate the article with Readability (`dom_smoothie`); when that comes
//!    up short after the extra removal, retry on the untouched document
//! 4. Sanitize the article content with the [`SanitizePolicy`]
//! 5. Serialize and collapse whitespace outside preformatted blocks
//!
//! Without the `readability` feature (or with `use_readability` off) step 3
//! takes the whole `<body>` as the article.

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::noise::UnlikelyCandidates;
use crate::options::Options;
use crate::patterns::WHITESPACE_RUN;
use crate::policy::SanitizePolicy;
use crate::result::Article;
use crate::sanitize::sanitize;

/// Reusable extraction pipeline.
///
/// Construction validates and compiles everything configurable once, so one
/// `Extractor` can serve many documents.
///
/// ```rust
/// use rs_article_sanitizer::{Extractor, Options};
///
/// let extractor = Extractor::new(Options {
///     use_readability: false,
///     ..Options::default()
/// })?;
/// let article = extractor.extract("<html><body><div><p class=\"x\">Hello   world</p></div></body></html>")?;
///
/// assert_eq!(article.content, "<p>Hello world</p>");
/// # Ok::<(), rs_article_sanitizer::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Extractor<'p> {
    options: Options,
    policy: &'p SanitizePolicy,
    #[cfg_attr(not(feature = "readability"), allow(dead_code))]
    unlikely: UnlikelyCandidates,
    preformatted_block: Regex,
}

impl Extractor<'static> {
    /// Pipeline with the standard sanitize policy.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_policy(options, SanitizePolicy::standard())
    }
}

impl<'p> Extractor<'p> {
    /// Pipeline with a caller-supplied sanitize policy.
    pub fn with_policy(options: Options, policy: &'p SanitizePolicy) -> Result<Self> {
        if let Some(url) = &options.url {
            Url::parse(url)?;
        }
        let unlikely = UnlikelyCandidates::new(&options.unlikely_terms)?;
        let preformatted_block = preformatted_block_pattern(policy.preformatted_tag())?;

        Ok(Self {
            options,
            policy,
            unlikely,
            preformatted_block,
        })
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn policy(&self) -> &SanitizePolicy {
        self.policy
    }

    /// Extract the article from `html`, using `options.url` as source URL.
    pub fn extract(&self, html: &str) -> Result<Article> {
        self.extract_from(html, self.options.url.as_deref())
    }

    /// Extract the article from `html` fetched from `url`.
    pub fn extract_from(&self, html: &str, url: Option<&str>) -> Result<Article> {
        if let Some(url) = url {
            Url::parse(url)?;
        }
        if html.trim().is_empty() {
            return Err(Error::NoContent);
        }

        let doc = dom::parse(html);
        let (article, content_html) = self.locate(&doc, url)?;
        self.finish(article, &content_html)
    }

    /// Extract from raw bytes, detecting the character encoding first.
    pub fn extract_bytes(&self, html: &[u8]) -> Result<Article> {
        let html = crate::encoding::transcode_to_utf8(html);
        self.extract(&html)
    }

    /// Find the article: metadata plus the unsanitized content HTML.
    #[cfg_attr(not(feature = "readability"), allow(unused_variables))]
    fn locate(&self, doc: &Document, url: Option<&str>) -> Result<(Article, String)> {
        #[cfg(feature = "readability")]
        if self.options.use_readability {
            return self
                .run_readability(doc, url)
                .map(|found| (found.article, found.content));
        }

        Ok(whole_body(doc))
    }

    /// Readability on the stripped document. When the extra terms removed
    /// something and the result falls short of Readability's own character
    /// threshold, run it again on the untouched document and keep the
    /// longer of the two.
    #[cfg(feature = "readability")]
    fn run_readability(&self, doc: &Document, url: Option<&str>) -> Result<Located> {
        let candidate = dom::clone_document(doc);
        let removed = self.unlikely.strip(&candidate);
        debug!(removed, "stripped extra unlikely candidates");

        let first = self.readability_pass(candidate, url);
        if removed == 0 {
            return first;
        }
        let threshold = self.readability_config().char_threshold;
        if matches!(first, Ok(ref found) if found.text_len >= threshold) {
            return first;
        }

        debug!(threshold, "short article after unlikely candidate removal, retrying on full document");
        let retry = self.readability_pass(dom::clone_document(doc), url);
        match (first, retry) {
            (Ok(first), Ok(retry)) if first.text_len >= retry.text_len => Ok(first),
            (Ok(first), Err(_)) => Ok(first),
            (_, retry) => retry,
        }
    }

    #[cfg(feature = "readability")]
    fn readability_config(&self) -> dom_smoothie::Config {
        dom_smoothie::Config {
            max_elements_to_parse: self.options.max_elements_to_parse,
            ..dom_smoothie::Config::default()
        }
    }

    #[cfg(feature = "readability")]
    fn readability_pass(&self, doc: Document, url: Option<&str>) -> Result<Located> {
        use dom_smoothie::Readability;

        let mut reader = Readability::with_document(doc, url, Some(self.readability_config()))
            .map_err(|e| Error::ExtractionError(e.to_string()))?;
        let found = reader
            .parse()
            .map_err(|e| Error::ExtractionError(e.to_string()))?;

        let article = Article {
            title: found.title,
            byline: found.byline,
            excerpt: found.excerpt,
            site_name: found.site_name,
            lang: found.lang,
            dir: found.dir,
            published_time: found.published_time,
            ..Article::default()
        };
        let text_len = found.text_content.trim().chars().count();
        // A page wrapper with no text in it counts as nothing found.
        let content = if text_len == 0 {
            String::new()
        } else {
            found.content.to_string()
        };
        Ok(Located {
            article,
            content,
            text_len,
        })
    }

    fn finish(&self, mut article: Article, content_html: &str) -> Result<Article> {
        if is_blank(content_html) {
            return Err(Error::NoContent);
        }

        let content = dom::parse(content_html);
        let body = dom::body(&content)
            .ok_or_else(|| Error::ParseError("article content has no body".into()))?;
        article.sanitize_report = sanitize(&body, self.policy)?;

        let html = dom::inner_html(&content.select("body")).to_string();
        article.content = if self.options.collapse_output_whitespace {
            collapse_outside(&html, &self.preformatted_block)
        } else {
            html
        };
        article.text_content = dom::text_value(&body).trim().to_string();
        article.length = article.text_content.chars().count();

        debug!(
            length = article.length,
            root_emptied = article.sanitize_report.root_emptied,
            "extracted article"
        );
        Ok(article)
    }
}

/// One Readability result: metadata, raw content HTML and its text length.
#[cfg(feature = "readability")]
struct Located {
    article: Article,
    content: String,
    text_len: usize,
}

/// The whole `<body>` as article, `<title>` and `<html lang>` as metadata.
fn whole_body(doc: &Document) -> (Article, String) {
    let article = Article {
        title: doc.select("title").text().trim().to_string(),
        lang: doc
            .select("html")
            .attr("lang")
            .map(|l| l.to_string())
            .filter(|l| !l.is_empty()),
        ..Article::default()
    };
    (article, dom::inner_html(&doc.select("body")).to_string())
}

fn is_blank(html: &str) -> bool {
    html.trim().is_empty()
}

/// Matches one serialized preformatted element, start tag to end tag.
fn preformatted_block_pattern(tag: &str) -> Result<Regex> {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
        .map_err(|e| Error::InvalidArgument(format!("preformatted tag: {e}")))
}

/// Collapse whitespace runs in serialized HTML, except inside the spans
/// `preformatted` matches.
fn collapse_outside(html: &str, preformatted: &Regex) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for block in preformatted.find_iter(html) {
        out.push_str(&WHITESPACE_RUN.replace_all(&html[last..block.start()], " "));
        out.push_str(block.as_str());
        last = block.end();
    }
    out.push_str(&WHITESPACE_RUN.replace_all(&html[last..], " "));
    out
}
