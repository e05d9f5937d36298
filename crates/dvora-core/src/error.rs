//! Error types for the dvora resolution engine
//!
//! Provides a single error enum with human-readable messages
//! and serde serialization so errors can be embedded in reports.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all dvora operations
///
/// Per-site variants (`HttpError`, `Status`, `ParseError`, `MalformedApiTemplate`)
/// are turned into error verdicts by the driver. `Config` aborts a whole category.
#[derive(Error, Debug)]
pub enum DvoraError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP request to {url} failed with status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to parse an HTML or JSON body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Template looks like a search API but its parts cannot be extracted
    #[error("Invalid API URL format: {0}")]
    MalformedApiTemplate(String),

    /// Match pattern could not be compiled
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Required catalog is missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Serialize for DvoraError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for dvora operations
pub type Result<T> = std::result::Result<T, DvoraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_status() {
        let error = DvoraError::Status {
            url: "https://example.com/search?s=x".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(
            error.to_string(),
            "HTTP request to https://example.com/search?s=x failed with status: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_error_display_parse_error() {
        let error = DvoraError::ParseError("expected value at line 1".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to parse response: expected value at line 1"
        );
    }

    #[test]
    fn test_error_display_malformed_template() {
        let error = DvoraError::MalformedApiTemplate("http://x/searching?q=".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid API URL format: http://x/searching?q="
        );
    }

    #[test]
    fn test_error_display_config() {
        let error = DvoraError::Config("shows.txt not found".to_string());
        assert_eq!(error.to_string(), "Configuration error: shows.txt not found");
    }

    #[test]
    fn test_error_serialize_with_message() {
        let error = DvoraError::ParseError("bad json".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Failed to parse response: bad json\"");
    }
}
