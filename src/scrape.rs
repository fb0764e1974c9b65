//! Fetch + extract behind one call.
//!
//! Error messages keep the word "Error" in their rendered text; older
//! consumers of the report output still look for it.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::extractor::{self, ExtractError, ExtractedText};
use crate::fetcher::{FetchError, Fetcher};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Error: Website blocked the scraper (Status Code: {})", .status.as_u16())]
    Blocked { status: StatusCode },

    #[error("Error scraping website: {0}")]
    Fetch(FetchError),

    #[error("Error scraping website: {0}")]
    Extract(#[from] ExtractError),
}

impl From<FetchError> for ScrapeError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http { status } => Self::Blocked { status },
            other => Self::Fetch(other),
        }
    }
}

impl ScrapeError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Blocked { status } => Some(*status),
            _ => None,
        }
    }
}

/// One GET, no retry. Every failure comes back as a [`ScrapeError`].
#[instrument(skip(fetcher))]
pub async fn scrape(fetcher: &Fetcher, url: &str) -> Result<ExtractedText, ScrapeError> {
    let response = fetcher.fetch(url).await.inspect_err(|e| {
        warn!(error = %e, transient = e.is_transient(), "fetch failed");
    })?;

    let extracted = extractor::extract(&response)?;
    info!(
        final_url = %extracted.url,
        chars = extracted.char_count,
        "page scraped"
    );

    Ok(extracted)
}
