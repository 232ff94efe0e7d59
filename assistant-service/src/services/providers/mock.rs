//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;

enum MockBehavior {
    /// Echo the prompt back.
    Echo,
    /// Always return the same text.
    Fixed(String),
    /// Simulate a model that produced no text.
    Empty,
}

/// Mock text provider for tests.
pub struct MockTextProvider {
    behavior: MockBehavior,
}

impl MockTextProvider {
    pub fn echo() -> Self {
        Self {
            behavior: MockBehavior::Echo,
        }
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fixed(reply.into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            behavior: MockBehavior::Empty,
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        match &self.behavior {
            MockBehavior::Echo => Ok(Some(format!("Mock response for: {}", prompt))),
            MockBehavior::Fixed(reply) => Ok(Some(reply.clone())),
            MockBehavior::Empty => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
