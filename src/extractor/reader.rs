use scraper::{ElementRef, Html, Selector};

use crate::extractor::ExtractError;

/// Elements whose text is collected, in document order.
const CONTENT_SELECTOR: &str = "p, h1, h2, h3, li";

/// Elements that never contribute text.
const NOISE_TAGS: [&str; 2] = ["script", "style"];

/// Text of every content-bearing element, joined with single spaces.
///
/// Nested matches (a `<p>` inside an `<li>`) each contribute their full text,
/// so the inner text appears twice.
pub fn collect_content_text(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(CONTENT_SELECTOR)
        .map_err(|e| ExtractError::Selector(format!("{e:?}")))?;

    let pieces: Vec<String> = document
        .select(&selector)
        .map(|element| {
            let mut text = String::new();
            visible_text(element, &mut text);
            text
        })
        .collect();

    Ok(pieces.join(" "))
}

/// Concatenated descendant text, skipping anything under `script`/`style`.
fn visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child)
            && !NOISE_TAGS.contains(&child_element.value().name())
        {
            visible_text(child_element, out);
        }
    }
}
