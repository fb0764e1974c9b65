use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    audit::prompt::PromptTemplate,
    completion::{CompletionError, CompletionService},
    extractor::language::DetectedLanguage,
    fetcher::Fetcher,
    scrape::{ScrapeError, scrape},
};

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Please enter a URL.")]
    EmptyUrl,

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// The page was scraped but the completion call failed.
    #[error("{source}")]
    Completion {
        extracted_chars: usize,
        #[source]
        source: CompletionError,
    },
}

/// Outcome of one audit: the model's report, shown verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub id: Uuid,
    pub url: Url,
    pub extracted_chars: usize,
    pub language: Option<DetectedLanguage>,
    pub model: String,
    pub prompt_version: String,
    pub report: String,
    pub generated_at: DateTime<Utc>,
}

/// Scrape a page, then ask the completion service to audit it.
pub struct Auditor {
    fetcher: Fetcher,
    completion: Arc<dyn CompletionService>,
    prompt: PromptTemplate,
}

impl Auditor {
    pub fn new(
        fetcher: Fetcher,
        completion: Arc<dyn CompletionService>,
        prompt: PromptTemplate,
    ) -> Self {
        Self {
            fetcher,
            completion,
            prompt,
        }
    }

    pub fn model(&self) -> &str {
        self.completion.model()
    }

    pub fn prompt_version(&self) -> &str {
        self.prompt.version()
    }

    /// At most one fetch and one completion call, in that order.
    #[instrument(skip(self), fields(audit_id))]
    pub async fn audit(&self, url: &str) -> Result<AuditReport, AuditError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AuditError::EmptyUrl);
        }

        let id = Uuid::new_v4();
        tracing::Span::current().record("audit_id", tracing::field::display(id));

        let extracted = scrape(&self.fetcher, url).await?;
        if extracted.text.is_empty() {
            warn!(url = %extracted.url, "no content text found, auditing empty page");
        }

        let prompt = self.prompt.render(&extracted.text);
        let report = self
            .completion
            .complete(&prompt)
            .await
            .map_err(|source| AuditError::Completion {
                extracted_chars: extracted.char_count,
                source,
            })?;

        info!(
            url = %extracted.url,
            extracted_chars = extracted.char_count,
            report_chars = report.len(),
            "audit complete"
        );

        Ok(AuditReport {
            id,
            url: extracted.url,
            extracted_chars: extracted.char_count,
            language: extracted.language,
            model: self.completion.model().to_string(),
            prompt_version: self.prompt.version().to_string(),
            report,
            generated_at: Utc::now(),
        })
    }
}
