//! Provider credential configuration.
//!
//! The API key is sourced from the process environment. A missing key is a
//! fatal startup condition: the application must halt before any prompt is
//! shown.

use daylog_core::error::{DaylogError, Result};
use std::env;

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the chat model.
pub const MODEL_VAR: &str = "DAYLOG_MODEL";

/// Default chat model when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Credentials and model selection for the text-generation provider.
#[derive(Debug, Clone)]
pub struct ProviderSecrets {
    pub api_key: String,
    pub model: String,
}

impl ProviderSecrets {
    /// Loads secrets from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `DaylogError::Config` if `OPENAI_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_values(env::var(API_KEY_VAR).ok(), env::var(MODEL_VAR).ok())
    }

    fn from_values(api_key: Option<String>, model: Option<String>) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DaylogError::config(format!(
                    "{API_KEY_VAR} not found. Please set the {API_KEY_VAR} environment variable."
                ))
            })?;

        let model = model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self { api_key, model })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = ProviderSecrets::from_values(None, None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_blank_api_key_is_config_error() {
        let err = ProviderSecrets::from_values(Some("   ".to_string()), None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_model_defaults() {
        let secrets =
            ProviderSecrets::from_values(Some("sk-test".to_string()), None).unwrap();
        assert_eq!(secrets.api_key, "sk-test");
        assert_eq!(secrets.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_model_override() {
        let secrets = ProviderSecrets::from_values(
            Some("sk-test".to_string()),
            Some("gpt-4o".to_string()),
        )
        .unwrap();
        assert_eq!(secrets.model, "gpt-4o");
    }
}
