//! Text-generation provider abstraction.
//!
//! A trait keeps the Gemini backend swappable and lets tests run against a
//! mock without network access.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text completion for the prompt. `Ok(None)` means the
    /// model returned no text; callers substitute a fixed fallback.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
