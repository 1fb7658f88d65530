//! Error types for the vergate core library
//!
//! This module defines the error handling system for version gating,
//! using thiserror for ergonomic error definitions.
//!
//! Deprecation is deliberately not represented here: a deprecated API
//! still works, so it surfaces as a log notice on
//! [`crate::gate::DEPRECATION_TARGET`] instead of an error.

use thiserror::Error;

/// Main error type for version gating operations
#[derive(Error, Debug)]
pub enum Error {
    /// A gated call happened before any connection to the host application
    #[error("host version not available: {message}")]
    NotInitialized { message: String },

    /// The live host version fails the operation's constraint
    #[error("API '{api_name}' is not compatible with host version {current_version}: {constraint}")]
    Incompatible {
        api_name: String,
        current_version: String,
        constraint: String,
        moved_to: Option<String>,
    },

    /// Malformed version string or field list
    #[error("invalid version '{input}': {message}")]
    Parse { input: String, message: String },

    /// JSON rendering of a compatibility report failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
