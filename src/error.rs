//! Error types for dine-scout

use thiserror::Error;

/// Main error type for dine-scout operations
#[derive(Error, Debug)]
pub enum Error {
    /// The provider session could not be created (missing credential,
    /// client construction failure). Terminal for the current query.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Every entry point failed, or the provider returned a non-OK status
    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a `QueryFailed` error from any displayable reason
    pub fn query_failed(reason: impl Into<String>) -> Self {
        Self::QueryFailed {
            reason: reason.into(),
        }
    }
}

/// Result type alias for dine-scout operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_errors_convert_to_json() {
        fn decode(raw: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(raw)?)
        }
        assert!(matches!(decode("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_query_failed_message() {
        let err = Error::query_failed("places-v1 returned status 503");
        assert_eq!(err.to_string(), "Query failed: places-v1 returned status 503");
    }
}
