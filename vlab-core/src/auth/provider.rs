//! Identity provider seam
//!
//! Token verification happens at the hosted identity provider, not here. The
//! [`IdentityProvider`] trait is the boundary; the server verifies a bearer
//! token through it and hands the resulting [`LearnerIdentity`] to handlers.
//! [`StaticTokenProvider`] is the in-process implementation used for local
//! development and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{AuthError, LearnerIdentity};

/// Resolves an opaque bearer token to a learner identity
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a token, returning the identity it was issued for
    async fn verify(&self, token: &str) -> Result<LearnerIdentity, AuthError>;
}

/// A fixed token-to-identity table.
///
/// Stands in for the hosted provider in development and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenProvider {
    tokens: HashMap<String, LearnerIdentity>,
}

impl StaticTokenProvider {
    /// Create an empty provider that rejects every token
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for an identity
    pub fn with_token(mut self, token: impl Into<String>, identity: LearnerIdentity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    async fn verify(&self, token: &str) -> Result<LearnerIdentity, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
