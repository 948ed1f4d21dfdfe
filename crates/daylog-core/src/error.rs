//! Error types for the daylog application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire daylog application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Recovery policy:
/// - `Validation`, `InvalidDate`, `InvalidMonth`: user-input failures,
///   reported without mutating shared state.
/// - `Provider`, `Unknown`: remote-provider failures, absorbed locally with
///   fixed fallback strings, never fatal.
/// - `Config`: missing credential at startup, the only fatal class.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DaylogError {
    /// Malformed or missing user-supplied field
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Date string did not parse as YYYY-MM-DD
    #[error("Date '{0}' must be in YYYY-MM-DD format")]
    InvalidDate(String),

    /// Month outside the range 1..=12
    #[error("Month {0} is out of range (expected 1-12)")]
    InvalidMonth(u32),

    /// Remote provider failed for transport/auth/rate-limit reasons
    #[error("Provider error: {0}")]
    Provider(String),

    /// Unexpected provider-side failure (malformed response, missing content)
    #[error("Unknown provider error: {0}")]
    Unknown(String),

    /// Configuration error (missing API key at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },
}

impl DaylogError {
    /// Creates a Validation error for a named input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Creates an Unknown error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an InvalidDate error
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, Self::InvalidDate(_))
    }

    /// Check if this is a Provider error
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for DaylogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DaylogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DaylogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DaylogError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DaylogError>`.
pub type Result<T> = std::result::Result<T, DaylogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_constructor() {
        let err = DaylogError::validation("time spent", "must be a positive number");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid time spent: must be a positive number"
        );
    }

    #[test]
    fn test_invalid_date_display() {
        let err = DaylogError::InvalidDate("2024-13-01".to_string());
        assert!(err.is_invalid_date());
        assert_eq!(
            err.to_string(),
            "Date '2024-13-01' must be in YYYY-MM-DD format"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DaylogError = io_err.into();
        assert!(matches!(err, DaylogError::Io { .. }));
    }
}
