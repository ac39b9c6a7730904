//! Error types for the client
//!
//! Provides custom error types covering the two things that can actually go
//! wrong on this side of the wire: talking to the rule authority service and
//! persisting the mode preference.
//!
//! Rule-level rejections (a query on the wrong side's turn) are not errors;
//! they are modeled in the reply types of [`crate::networking::client`].

use thiserror::Error;

/// Errors that can occur in the client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure reaching the rule authority service
    #[error("Authority request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The authority answered with a status outside the documented contract
    #[error("Authority returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    /// Preference serialization/deserialization error
    #[error("Preference serialization error: {0}")]
    Preference(#[from] serde_json::Error),
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
