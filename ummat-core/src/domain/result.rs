//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Only the edges can fail: configuration, row sources and the event log.
/// The reporting pipeline itself is total and never returns this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Row source error: {0}")]
    Source(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a row source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Envelope for JSON output: `{ "success": .., "data": .., "error": .. }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T, E: std::fmt::Display> From<std::result::Result<T, E>> for OperationResult<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i64> = OperationResult::ok(50_000);
        assert!(result.success);
        assert_eq!(result.data, Some(50_000));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_operation_result_from_error() {
        let err: Result<i64> = Err(Error::config("spreadsheetId is empty"));
        let result: OperationResult<i64> = err.into();
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(
            result.error.as_deref(),
            Some("Configuration error: spreadsheetId is empty")
        );
    }

    #[test]
    fn test_operation_result_serializes_envelope() {
        let result: OperationResult<u32> = OperationResult::fail("boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json["data"].is_null());
    }
}
