//! Error types for configuration loading.

use thiserror::Error;

/// Errors from reading or validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(String),
    /// Configuration file is not valid JSON for the schema.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Parsed values are out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
