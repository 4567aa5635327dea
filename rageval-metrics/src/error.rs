//! Error types for the rageval-metrics crate.

use thiserror::Error;

/// Top-level error type for metric scoring.
///
/// Empty or whitespace-only texts are never errors; every scorer has a defined
/// result for them. Only structurally invalid calls end up here.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Batch error: {0}")]
    Batch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetricsError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is a validation failure of the caller's arguments.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<figment::Error> for MetricsError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = MetricsError::invalid_input("reference set is empty");
        assert_eq!(err.to_string(), "Invalid input: reference set is empty");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_config_is_not_invalid_input() {
        assert!(!MetricsError::config("bad").is_invalid_input());
    }
}
