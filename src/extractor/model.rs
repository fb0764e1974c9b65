use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extractor::language::DetectedLanguage;

/// Plain text pulled from one page, ready to be handed to the auditor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub url: Url,
    pub text: String,
    /// Length of `text` in characters.
    pub char_count: usize,
    pub language: Option<DetectedLanguage>,
    pub fetched_at: DateTime<Utc>,
}
