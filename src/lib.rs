//! # rs-article-sanitizer
//!
//! Extracts the readable article from an HTML page and normalizes it into a
//! minimal, whitespace-clean HTML fragment ready for storage, display or
//! indexing.
//!
//! Parsing is done by `dom_query` and locating the article by `dom_smoothie`
//! (a Readability port). The heart of the crate is the post-extraction
//! sanitizer: a single non-recursive pass that rewrites an element subtree
//! in place according to a declarative [`SanitizePolicy`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_article_sanitizer::{sanitize_html, SanitizePolicy};
//!
//! let html = r#"<div class="post"><p style="color:red">Hello,   <span>world</span></p><p></p></div>"#;
//! let clean = sanitize_html(html, SanitizePolicy::standard())?;
//!
//! assert_eq!(clean, "<p>Hello, world</p>");
//! # Ok::<(), rs_article_sanitizer::Error>(())
//! ```
//!
//! ## What the standard policy does
//!
//! - **Whitelisted elements** (`svg`, `video`, `picture`) pass through untouched
//! - **Attributes** are reduced to `href` on links, `src`/`alt`/`srcset`/`sizes`
//!   on images, `colspan`/`rowspan` on table cells and `name` everywhere
//! - **Wrappers** (`span`, `div`) are unwrapped in place
//! - **Preformatted text** (`pre`) keeps its whitespace; `<br>` inside becomes `\n`
//! - **Empty elements** are pruned, cascading up through emptied ancestors
//! - **Comments** and other non-element nodes are removed

mod error;
mod extract;
mod options;
mod result;

/// DOM operations adapter over `dom_query` nodes.
pub mod dom;

/// Compiled regex patterns.
pub mod patterns;

/// Sanitization policy (whitelists, collapsible tags, preformatted handling).
pub mod policy;

/// The sanitizing tree walker.
pub mod sanitize;

/// Extra unlikely-candidate terms for article extraction.
pub mod noise;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::Extractor;
pub use options::Options;
pub use policy::{PolicyBuilder, SanitizePolicy};
pub use result::Article;
pub use sanitize::{collapse_whitespace, sanitize, sanitize_html, sanitize_selection, SanitizeReport};

/// Extracts and sanitizes the article of an HTML document using default
/// options and the standard policy.
///
/// # Example
///
/// ```rust,no_run
/// use rs_article_sanitizer::extract;
///
/// let html = std::fs::read_to_string("page.html")?;
/// let article = extract(&html)?;
/// println!("{}\n\n{}", article.title, article.content);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract(html: &str) -> Result<Article> {
    extract_with_options(html, &Options::default())
}

/// Extracts and sanitizes the article of an HTML document with custom options.
///
/// Builds a one-off [`Extractor`]; keep an `Extractor` around instead when
/// processing many documents with the same options.
pub fn extract_with_options(html: &str, options: &Options) -> Result<Article> {
    Extractor::new(options.clone())?.extract(html)
}

/// Extracts from HTML bytes with automatic encoding detection.
///
/// The encoding is taken from a byte order mark or a `<meta>` charset
/// declaration, defaulting to UTF-8.
pub fn extract_bytes(html: &[u8]) -> Result<Article> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts from HTML bytes with custom options and automatic encoding detection.
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<Article> {
    Extractor::new(options.clone())?.extract_bytes(html)
}
