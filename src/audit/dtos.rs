use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::audit::service::AuditReport;

const MAX_URL_LEN: usize = 2048;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AuditRequest {
    /// Page to audit, e.g. `https://www.example.com/sustainability`.
    pub url: String,
}

impl AuditRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("Please enter a URL.".to_string());
        }
        if self.url.len() > MAX_URL_LEN {
            return Err("URL too long".to_string());
        }
        Ok(())
    }
}

/// Body of the HTML form post.
#[derive(Debug, Deserialize)]
pub struct AuditForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditResponse {
    pub id: String,
    pub url: String,
    pub extracted_chars: usize,
    /// ISO 639-3 code of the page language, when it could be detected.
    pub language: Option<String>,
    pub model: String,
    pub prompt_version: String,
    /// Model output, verbatim.
    pub report: String,
    pub generated_at: DateTime<Utc>,
}

impl From<AuditReport> for AuditResponse {
    fn from(report: AuditReport) -> Self {
        Self {
            id: report.id.to_string(),
            url: report.url.to_string(),
            extracted_chars: report.extracted_chars,
            language: report.language.map(|l| l.code),
            model: report.model,
            prompt_version: report.prompt_version,
            report: report.report,
            generated_at: report.generated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
