#![cfg(feature = "readability")]
#![allow(clippy::unwrap_used)] // panicking is the failure report in tests

use rs_article_sanitizer::{extract, extract_with_options, Extractor, Options};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const PARAGRAPHS: &[&str] = &[
    "Sanitizing extracted articles is the last step before content reaches a reader. \
     The extracted tree still carries presentation attributes, wrapper elements and \
     whitespace left over from templates, and none of it belongs in stored content.",
    "A good sanitizer walks the tree once, keeps the handful of elements that carry \
     meaning, drops attributes that only matter to the original site and removes \
     elements that end up with nothing inside them.",
    "Preformatted blocks are the exception to whitespace collapsing. Code samples \
     depend on their indentation, so the text inside them must survive untouched \
     while line break elements turn into plain newline characters.",
    "Media elements such as video and picture are kept exactly as they arrive, \
     because their inner markup is structural rather than decorative and rewriting \
     it tends to break playback or responsive image selection.",
];

fn article_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>How Rust Sanitizes Articles | Example Blog</title>
  <meta charset="utf-8">
</head>
<body>
  <nav class="menu"><a href="/">Home</a> <a href="/blog">Blog</a></nav>
  {body}
  <footer class="site-footer"><p>Copyright Example Blog</p></footer>
</body>
</html>"#
    )
}

fn article_body() -> String {
    let paragraphs: String = PARAGRAPHS
        .iter()
        .map(|p| format!(r#"<p class="lead" style="margin:0">{p}</p>"#))
        .collect();

    format!(
        r#"<article>
    <h1>How Rust Sanitizes Articles</h1>
    <div class="featured-posts"><p>Featured story: a completely different post that only the sidebar template wanted to show, with enough words to look like real prose to a scorer.</p></div>
    {paragraphs}
    <p>Read the <a href="https://example.com/docs" target="_blank" class="ext">reference <span>docs</span></a> for details.</p>
    <pre class="code"><code>fn main() {{
    let s = "  spaced  ";<br>    println!("{{s}}");
}}</code></pre>
    <aside class="trending"><p>Trending now: ten things you will not believe about whitespace.</p></aside>
  </article>"#
    )
}

#[test]
fn extracts_and_sanitizes_article() {
    init_tracing();

    let article = extract(&article_page(&article_body())).unwrap();

    assert!(article.title.contains("Sanitizes Articles"), "title was {:?}", article.title);
    assert!(!article.content.contains("Featured story"));
    assert!(!article.content.contains("Trending now"));
    assert!(!article.content.contains("class="));
    assert!(!article.content.contains("style="));
    assert!(!article.content.contains("target="));
    assert!(!article.content.contains("<span"));
    assert!(!article.content.contains("<div"));
    assert!(article.content.contains(r#"href="https://example.com/docs""#));
    assert!(article.content.contains("Preformatted blocks are the exception"));
    assert!(article.content.contains("fn main() {\n    let s"));
    assert!(article.text_content.contains("responsive image selection"));
    assert_eq!(article.length, article.text_content.chars().count());
}

#[test]
fn preformatted_code_keeps_whitespace_and_line_breaks() {
    init_tracing();

    let article = extract(&article_page(&article_body())).unwrap();

    assert!(article.content.contains(r#"let s = "  spaced  ";"#));
    assert!(article.content.contains("\n    println!"));
    assert!(!article.content.contains("<br"));
    assert!(!article.content.contains("<code"));
}

#[test]
fn retries_on_full_document_when_extra_terms_remove_everything() {
    init_tracing();

    let paragraphs: String = PARAGRAPHS.iter().map(|p| format!("<p>{p}</p>")).collect();
    let html = article_page(&format!(r#"<div class="featured"><h1>Only story</h1>{paragraphs}</div>"#));

    let article = extract(&html).unwrap();

    assert!(article.content.contains("Media elements such as video"));
}

#[test]
fn retries_on_full_document_when_extra_terms_leave_a_short_article() {
    init_tracing();

    let paragraphs: String = PARAGRAPHS.iter().map(|p| format!("<p>{p}</p>")).collect();
    let short = "A single short paragraph sits next to the featured block, long enough to be \
                 picked up on its own but well under the character threshold.";
    let html = article_page(&format!(
        r#"<div class="featured"><h1>Only story</h1>{paragraphs}</div><p>{short}</p>"#
    ));

    let article = extract(&html).unwrap();

    assert!(article.content.contains("Media elements such as video"));
    assert!(article.text_content.chars().count() > 500);
}

#[test]
fn extra_terms_can_be_disabled() {
    init_tracing();

    let options = Options {
        unlikely_terms: Vec::new(),
        ..Options::default()
    };
    let extractor = Extractor::new(options).unwrap();

    let article = extractor.extract(&article_page(&article_body())).unwrap();

    assert!(article.content.contains("Preformatted blocks are the exception"));
}

#[test]
fn source_url_resolves_relative_links() {
    init_tracing();

    let body = article_body().replace("https://example.com/docs", "/docs");
    let options = Options {
        url: Some("https://example.com/blog/post".to_string()),
        ..Options::default()
    };

    let article = extract_with_options(&article_page(&body), &options).unwrap();

    assert!(article.content.contains(r#"href="https://example.com/docs""#));
}
