//! Client side of the external text-completion service.

pub mod errors;
pub mod gemini;

pub use errors::CompletionError;
pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Something that turns a prompt into free-form text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Model identifier, reported alongside each audit.
    fn model(&self) -> &str;
}
