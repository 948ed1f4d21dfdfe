//! daylog-interaction - remote provider layer.
//!
//! Implements the core's `SuggestionProvider` and `ChatProvider` traits
//! against the OpenAI Chat Completions API, with credentials sourced from
//! the process environment.

pub mod config;
pub mod openai;

pub use config::ProviderSecrets;
pub use openai::OpenAiClient;
