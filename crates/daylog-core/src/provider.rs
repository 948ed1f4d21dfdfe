//! Remote text-generation provider boundary.
//!
//! The suggestion and chat capabilities are black-box request/response
//! services. These traits define the contract the core depends on; the
//! concrete HTTP client lives in `daylog-interaction`.

use crate::conversation::ConversationMessage;
use crate::error::Result;
use async_trait::async_trait;

/// Sampling parameters for a provider call.
///
/// Treated as fixed configuration: suggestions and chat each have one preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationConfig {
    /// Preset for activity suggestions.
    pub fn suggestions() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.7,
        }
    }

    /// Preset for chat turns.
    pub fn chat() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.7,
        }
    }
}

/// A remote text-completion capability used for activity suggestions.
///
/// # Failure contract
///
/// Transport, auth, and rate-limit failures surface as
/// `DaylogError::Provider`; malformed responses as `DaylogError::Unknown`.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Completes a prompt, returning the generated text.
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

/// A remote chat capability used for conversation turns.
///
/// The caller supplies the conversation context as an ordered message
/// sequence; the provider returns the assistant's reply text. Failure
/// contract as for [`SuggestionProvider`].
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Produces the assistant reply for the given conversation context.
    async fn chat(
        &self,
        messages: &[ConversationMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String>;
}
