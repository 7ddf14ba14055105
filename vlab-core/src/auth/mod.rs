//! Authentication context and the identity-provider seam
//!
//! Identity is owned by an external provider. Everything in this crate takes
//! an [`AuthContext`] handed in by the HTTP layer; no domain logic reaches
//! for ambient session state.

mod context;
mod error;
mod provider;

pub use context::{AuthContext, LearnerIdentity};
pub use error::AuthError;
pub use provider::{IdentityProvider, StaticTokenProvider};
