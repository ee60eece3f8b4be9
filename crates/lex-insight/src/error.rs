//! Custom error types for the analysis library.
//!
//! This module provides a single error hierarchy using `thiserror`
//! so every analysis step reports failures the same way.
//!
//! Errors are serializable, which lets the CLI embed them in JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for dataset analysis.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The dataset cannot be analyzed (e.g. it has zero rows).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML project configuration error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightError>,
    },
}

impl InsightError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code, e.g. for JSON consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Yaml(_) => "YAML_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the data or settings supplied by the caller.
    ///
    /// The CLI exits with status 2 for these instead of 1.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            InsightError::InvalidInput("empty".to_string()).error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            InsightError::InvalidConfig("low >= high".to_string()).error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(InsightError::InvalidInput("empty".to_string()).is_input_error());
        assert!(InsightError::InvalidConfig("bad".to_string()).is_input_error());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!InsightError::Io(io).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = InsightError::InvalidInput("no rows in Assists".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("INVALID_INPUT"));
        assert!(json.contains("Assists"));
    }

    #[test]
    fn test_with_context() {
        let error =
            InsightError::InvalidInput("zero rows".to_string()).with_context("During outlier scan");
        assert!(error.to_string().contains("During outlier scan"));
        assert_eq!(error.error_code(), "INVALID_INPUT");
        assert!(error.is_input_error());
    }
}
