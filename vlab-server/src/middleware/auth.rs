//! Authentication middleware for axum
//!
//! Resolves the request's bearer token through the configured
//! [`IdentityProvider`] and attaches an [`AuthContext`] to the request.
//! Requests without a token pass through as [`AuthContext::Anonymous`];
//! handlers that require identity reject those with 401. A token that is
//! present but fails verification is rejected here.

use std::sync::Arc;

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use vlab_core::{AuthContext, IdentityProvider};

use crate::http::ErrorResponse;

/// Authentication layer state
#[derive(Clone)]
pub struct AuthLayer {
    provider: Arc<dyn IdentityProvider>,
}

impl AuthLayer {
    /// Create a new AuthLayer over an identity provider
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer(request: &Request) -> Option<String> {
    let header = request.headers().get(axum::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.trim().to_string())
}

/// Authentication middleware function
pub async fn auth_middleware(
    axum::Extension(auth_layer): axum::Extension<AuthLayer>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_context = match extract_bearer(&request) {
        Some(token) => match auth_layer.provider.verify(&token).await {
            Ok(identity) => AuthContext::Authenticated { identity },
            Err(e) => {
                tracing::debug!("token verification failed: {}", e);
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Unauthorized")),
                )
                    .into_response();
            }
        },
        None => AuthContext::Anonymous,
    };

    request.extensions_mut().insert(auth_context);

    next.run(request).await
}
