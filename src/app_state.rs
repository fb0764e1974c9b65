use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    audit::{Auditor, PromptTemplate},
    completion::GeminiClient,
    config::Config,
    fetcher::Fetcher,
};

/// Shown in place of the audit form when no credential is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "Missing API Key. Set GOOGLE_API_KEY in the server environment.";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the completion credential is missing; auditing is disabled.
    pub auditor: Option<Arc<Auditor>>,
}

impl AppState {
    pub fn new(config: Config, auditor: Option<Auditor>) -> Self {
        Self {
            config: Arc::new(config),
            auditor: auditor.map(Arc::new),
        }
    }

    /// Wire up the fetcher, prompt template and completion client.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let prompt = PromptTemplate::load(config.prompt_path())?;

        let auditor = match config.api_key() {
            Some(api_key) => {
                let completion = GeminiClient::new(
                    api_key,
                    config.model(),
                    config.completion_base_url(),
                )?;
                info!(model = config.model(), "completion service configured");
                Some(Auditor::new(Fetcher::new()?, Arc::new(completion), prompt))
            }
            None => {
                warn!("{MISSING_API_KEY_MESSAGE}");
                None
            }
        };

        Ok(Self::new(config, auditor))
    }
}
