use std::error::Error as StdError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout: {0}")]
    ConnectTimeout(String),

    #[error("request timeout: {0}")]
    RequestTimeout(String),

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http status {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether the failure is likely to go away on its own. Nothing retries;
    /// this only feeds logs.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::InvalidUrl(_) => false,
            Self::UnsupportedScheme(_) => false,
            Self::BodyTooLarge(_) => false,
            Self::RedirectLoop => false,
            Self::Http { status } => status.is_server_error(),

            Self::Connect(_) => true,
            Self::ConnectTimeout(_) => true,
            Self::RequestTimeout(_) => true,
            Self::Io(_) => true,
            Self::Unknown(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout(error_chain(&err))
            } else {
                Self::RequestTimeout(error_chain(&err))
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(error_chain(&err))
        } else if err.is_body() || err.is_decode() {
            Self::Io(error_chain(&err))
        } else {
            Self::Unknown(error_chain(&err))
        }
    }
}

/// `err` followed by every `source()` below it, joined with `": "`.
///
/// reqwest's own message only names the URL; the cause (timeout, refused
/// connection, DNS failure) lives further down the chain.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
