//! Character encoding detection and transcoding.
//!
//! Byte input is decoded the way browsers prescan a document: a byte order
//! mark wins, then the first `charset=` found in a `<meta>` tag within the
//! first 1024 bytes, then UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use tracing::trace;

/// How many leading bytes are searched for a charset declaration.
const PRESCAN_LEN: usize = 1024;

/// `charset=` inside a `<meta>` tag. Covers both `<meta charset="...">` and
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?\bcharset\s*=\s*["']?([-\w:.]+)"#).expect("META_CHARSET regex")
});

/// Detect the character encoding of an HTML document.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(PRESCAN_LEN)]);
    META_CHARSET
        .captures_iter(&head)
        .filter_map(|c| c.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD instead of failing.
///
/// ```
/// use rs_article_sanitizer::encoding::transcode_to_utf8;
///
/// let html = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    trace!(encoding = used.name(), had_errors, "decoded document bytes");
    decoded.into_owned()
}
