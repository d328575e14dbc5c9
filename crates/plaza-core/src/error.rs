//! Error types for the Plaza client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Plaza client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PlazaError {
    /// No access credential is available for an authenticated request.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The API answered with a non-success status.
    ///
    /// `message` carries the response body text verbatim, which is what the
    /// platform returns as its user-facing error description.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// IO error (credential/config file operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data access error (token store / storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Client-side validation failure, rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlazaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Api error from a status code and response body text.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Api error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the HTTP status code if this is an Api error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the user-facing message for this error.
    ///
    /// For Api errors this is the response body text verbatim; other variants
    /// fall back to their Display rendering. This is the text handed to error
    /// sinks so list views can show what the server actually said.
    pub fn surface_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PlazaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PlazaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PlazaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PlazaError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for PlazaError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, PlazaError>`.
pub type Result<T> = std::result::Result<T, PlazaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_surfaces_body_text() {
        let err = PlazaError::api(404, "post not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.surface_message(), "post not found");
        assert!(err.is_api());
    }

    #[test]
    fn test_network_error_surfaces_display() {
        let err = PlazaError::network("connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.surface_message(), "Network error: connection refused");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PlazaError = io.into();
        assert!(matches!(err, PlazaError::Io { .. }));
    }
}
