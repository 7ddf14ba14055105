//! Authentication context types

use serde::{Deserialize, Serialize};

/// Authentication context for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AuthContext {
    /// Verified by the external identity provider
    Authenticated {
        /// The authenticated learner's identity
        identity: LearnerIdentity,
    },
    /// No valid identity; mutating routes reject this
    Anonymous,
}

impl AuthContext {
    /// Returns the identity if authenticated, None otherwise
    pub fn identity(&self) -> Option<&LearnerIdentity> {
        match self {
            AuthContext::Authenticated { identity } => Some(identity),
            AuthContext::Anonymous => None,
        }
    }

    /// Returns the learner's user id if authenticated
    pub fn user_id(&self) -> Option<&str> {
        self.identity().map(|i| i.user_id.as_str())
    }

    /// Returns true if the request is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Authenticated { .. })
    }
}

/// Identity information issued by the external provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerIdentity {
    /// Opaque user id from the identity provider
    pub user_id: String,
    /// Email address, when the provider shares it
    pub email: Option<String>,
    /// Display name, when the provider shares it
    pub name: Option<String>,
}

impl LearnerIdentity {
    /// Create a new LearnerIdentity from a provider-issued user id
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            name: None,
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_authenticated() {
        let ctx = AuthContext::Authenticated {
            identity: LearnerIdentity::new("user_123"),
        };
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.user_id(), Some("user_123"));
    }

    #[test]
    fn test_auth_context_anonymous() {
        let ctx = AuthContext::Anonymous;
        assert!(!ctx.is_authenticated());
        assert!(ctx.identity().is_none());
        assert!(ctx.user_id().is_none());
    }

    #[test]
    fn test_learner_identity_builder() {
        let identity = LearnerIdentity::new("user_123")
            .with_email("learner@example.com")
            .with_name("Test Learner");
        assert_eq!(identity.user_id, "user_123");
        assert_eq!(identity.email, Some("learner@example.com".to_string()));
        assert_eq!(identity.name, Some("Test Learner".to_string()));
    }

    #[test]
    fn test_auth_context_serialize_tag() {
        let json = serde_json::to_string(&AuthContext::Anonymous).unwrap();
        assert!(json.contains("\"source\":\"anonymous\""));
    }
}
