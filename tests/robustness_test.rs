#![allow(clippy::unwrap_used, clippy::expect_used)] // panicking is the failure report in tests

use rs_article_sanitizer::{
    extract_bytes_with_options, extract_with_options, sanitize_html, Error, Options, SanitizePolicy,
};

fn body_only() -> Options {
    Options {
        use_readability: false,
        ..Options::default()
    }
}

#[test]
fn empty_input_is_no_content() {
    assert!(matches!(extract_with_options("", &body_only()), Err(Error::NoContent)));
    assert!(matches!(extract_with_options(" \n\t", &body_only()), Err(Error::NoContent)));
}

#[test]
fn bad_url_option_is_invalid_argument() {
    let options = Options {
        url: Some("not a url".to_string()),
        ..body_only()
    };

    assert!(matches!(
        extract_with_options("<p>x</p>", &options),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn unclosed_tags_are_sanitized() {
    let html = sanitize_html("<div><p>one<p>two <b>bold<span>in", SanitizePolicy::standard()).unwrap();

    assert_eq!(html, "<p>one</p><p>two <b>boldin</b></p>");
}

#[test]
fn stray_end_tags_and_comments() {
    let html = sanitize_html("</span><p>a</div><!-- c -->b</p></p>", SanitizePolicy::standard()).unwrap();

    assert_eq!(html, "<p>ab</p>");
}

#[test]
fn only_markup_noise_gives_empty_article() {
    let article = extract_with_options(
        "<div><span> </span></div><!-- nothing -->",
        &body_only(),
    )
    .unwrap();

    assert!(article.is_empty());
    assert_eq!(article.length, 0);
}

#[test]
fn legacy_encoded_bytes() {
    let html = b"<html><head><meta charset=\"windows-1252\"></head><body><p>Caf\xE9   \x93ok\x94</p></body></html>";

    let article = extract_bytes_with_options(html, &body_only()).unwrap();

    assert_eq!(article.content, "<p>Caf\u{e9} \u{201C}ok\u{201D}</p>");
}

#[test]
fn policy_loaded_from_json() {
    let policy = SanitizePolicy::from_json(
        r#"{
            "element_whitelist": ["figure"],
            "attribute_whitelists": {"a": ["href", "title"]},
            "default_attributes": [],
            "collapsible_tags": ["span", "div", "font"],
            "preformatted_tag": "pre",
            "line_break_tag": "br",
            "content_optional": ["img"]
        }"#,
    )
    .unwrap();

    let html = sanitize_html(
        r#"<figure class="f"><div>kept  as is</div></figure><p name="n"><font color="red"><a href="/x" title="t" rel="r">l</a></font></p>"#,
        &policy,
    )
    .unwrap();

    assert_eq!(
        html,
        r#"<figure class="f"><div>kept  as is</div></figure><p><a href="/x" title="t">l</a></p>"#
    );
}

#[test]
fn malformed_policy_json_is_invalid_argument() {
    assert!(matches!(
        SanitizePolicy::from_json(r#"{"element_whitelist": 3}"#),
        Err(Error::InvalidArgument(_))
    ));
}
