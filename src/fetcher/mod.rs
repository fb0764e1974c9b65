pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{BROWSER_ACCEPT_LANGUAGE, BROWSER_USER_AGENT, FETCH_TIMEOUT, Fetcher, request_headers};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
