use chrono::Utc;
use std::fs;
use url::Url;

use crate::extractor::{MAX_TEXT_CHARS, extract, extract_text};
use crate::fetcher::types::{Charset, PageResponse};

#[test]
fn test_extract_sustainability_page() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/sustainability.html")
        .expect("Failed to read test fixture");

    let text = extract_text(&html).unwrap();

    assert_eq!(
        text,
        "Our Planet Promise\n\
         We make eco-friendly clothing\n\
         for everyday life.\n\
         Carbon Neutral Shipping Every order is carbon neutral thanks to our offset partners. \
         Our Goals Net Zero by 2040 Less plastic in every parcel Sustainable\n\
         since\n\
         1998"
    );
    assert!(!text.contains("dataLayer"));
    assert!(!text.contains("font-family"));
    assert!(!text.contains("Organization"));
    assert!(!text.contains("Free returns"));
    assert!(!text.contains("Small print"));
}

#[test]
fn test_whitespace_padded_lines_are_dropped() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/whitespace.html")
        .expect("Failed to read test fixture");

    let text = extract_text(&html).unwrap();

    assert_eq!(text, "First paragraph, padded.\nItem one\nTabbed\theading");
    assert!(text.lines().all(|line| !line.trim().is_empty()));
}

#[test]
fn test_minimal_document_excludes_script() {
    let html = "<html><body><p>Hello</p><script>ignored</script></body></html>";
    assert_eq!(extract_text(html).unwrap(), "Hello");
}

#[test]
fn test_long_document_is_truncated() {
    let html = format!(
        "<html><body>{}</body></html>",
        "<p>Sustainable materials sourced responsibly.</p>".repeat(2_000)
    );

    let text = extract_text(&html).unwrap();
    assert_eq!(text.chars().count(), MAX_TEXT_CHARS);
}

#[test]
fn test_extraction_is_idempotent() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/sustainability.html")
        .expect("Failed to read test fixture");

    assert_eq!(extract_text(&html).unwrap(), extract_text(&html).unwrap());
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content<li>Loose item";

    let text = extract_text(html).unwrap();
    assert!(text.contains("Unclosed tags"));
    assert!(text.contains("Loose item"));
}

#[test]
fn test_extract_page_response() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/sustainability.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://example.com/sustainability");
    let extracted = extract(&response).unwrap();

    assert_eq!(extracted.url.as_str(), "https://example.com/sustainability");
    assert_eq!(extracted.char_count, extracted.text.chars().count());
    assert_eq!(extracted.fetched_at, response.fetched_at);
    assert_eq!(extracted.language.map(|l| l.code), Some("eng".to_string()));
}

#[test]
fn test_extract_empty_page() {
    let response = create_test_response(
        "<html><body><div>nothing here</div></body></html>".to_string(),
        "https://example.com/empty",
    );
    let extracted = extract(&response).unwrap();

    assert_eq!(extracted.text, "");
    assert_eq!(extracted.char_count, 0);
    assert!(extracted.language.is_none());
}

#[test]
fn test_control_padding_is_trimmed() {
    let text = extract_text("<p>\u{1f}Hello\u{1f}</p><li>\u{85}World\u{a0}</li>").unwrap();
    assert_eq!(text, "Hello\nWorld");
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract_text(&html);
        }

        #[test]
        fn test_output_is_bounded_and_has_no_blank_lines(
            pieces in proptest::collection::vec("[a-z \\n\\t]{0,40}", 0..50),
        ) {
            let html: String = pieces.iter().map(|p| format!("<p>{p}</p>")).collect();
            let text = extract_text(&html).unwrap();
            prop_assert!(text.chars().count() <= MAX_TEXT_CHARS);
            prop_assert!(text.is_empty() || text.lines().all(|line| !line.trim().is_empty()));
            prop_assert!(!text.contains("  "));
        }
    }
}
