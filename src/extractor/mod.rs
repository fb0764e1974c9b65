pub mod cleaner;
pub mod language;
pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use cleaner::MAX_TEXT_CHARS;
pub use model::ExtractedText;

use thiserror::Error;
use tracing::debug;

use crate::fetcher::types::PageResponse;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid content selector: {0}")]
    Selector(String),
}

/// HTML to bounded plain text: content elements only, whitespace
/// normalized, cut to [`MAX_TEXT_CHARS`].
pub fn extract_text(html: &str) -> Result<String, ExtractError> {
    let joined = reader::collect_content_text(html)?;
    let normalized = cleaner::normalize_whitespace(&joined);
    Ok(cleaner::truncate_chars(normalized, MAX_TEXT_CHARS))
}

pub fn extract(resp: &PageResponse) -> Result<ExtractedText, ExtractError> {
    let text = extract_text(&resp.body_utf8)?;
    let char_count = text.chars().count();
    let language = language::detect_language(&text);

    debug!(
        url = %resp.url_final,
        chars = char_count,
        language = language.as_ref().map(|l| l.code.as_str()),
        "text extracted"
    );

    Ok(ExtractedText {
        url: resp.url_final.clone(),
        text,
        char_count,
        language,
        fetched_at: resp.fetched_at,
    })
}
