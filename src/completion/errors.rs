use thiserror::Error;

use crate::fetcher::errors::error_chain;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("API Error: request failed: {0}")]
    Transport(String),

    #[error("API Error: status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("API Error: prompt blocked ({0})")]
    Blocked(String),

    #[error("API Error: empty response (finish reason: {})", .finish_reason.as_deref().unwrap_or("unknown"))]
    EmptyResponse { finish_reason: Option<String> },

    #[error("API Error: malformed response: {0}")]
    Decode(String),
}

impl CompletionError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(error_chain(&err))
        } else {
            Self::Transport(error_chain(&err))
        }
    }
}
