use serde::{Deserialize, Serialize};
use whatlang::Detector;

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// Language guess for extracted page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// ISO 639-3 code, e.g. `eng`.
    pub code: String,
    pub name: String,
    pub confidence: f64,
}

pub fn detect_language(text: &str) -> Option<DetectedLanguage> {
    if text.trim().chars().count() < MIN_TEXT_LENGTH {
        return None;
    }

    let info = Detector::new().detect(text)?;
    if info.confidence() < MIN_CONFIDENCE {
        return None;
    }

    Some(DetectedLanguage {
        code: info.lang().code().to_string(),
        name: info.lang().eng_name().to_string(),
        confidence: info.confidence(),
    })
}
