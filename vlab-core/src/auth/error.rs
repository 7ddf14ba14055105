//! Auth error types

use thiserror::Error;

/// Errors from identity verification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The token was not recognized by the provider
    #[error("invalid token")]
    InvalidToken,

    /// The token was valid once but has expired
    #[error("token expired")]
    Expired,

    /// The provider could not be reached
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}
