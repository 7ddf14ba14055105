//! HTTP server module

mod api;
mod catalog;
mod feedback;
mod progress;
mod quiz;

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::AppState;
use crate::middleware::{AuthLayer, auth_middleware};

pub use api::HealthResponse;
pub use catalog::{ExperimentSectionsResponse, SectionView};

/// Error body returned by every route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable message
    pub error: String,
}

impl ErrorResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// 500 body that never leaks internal detail. The cause goes to the log.
fn internal_error(context: &str, err: impl std::fmt::Display) -> (StatusCode, axum::Json<ErrorResponse>) {
    tracing::error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(ErrorResponse::new("Internal server error")),
    )
}

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let auth_layer = AuthLayer::new(state.identity.clone());

    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/categories", get(catalog::list_categories))
        .route(
            "/api/categories/:slug/experiments",
            get(catalog::list_category_experiments),
        )
        .route("/api/experiments/:slug", get(catalog::get_experiment))
        .route(
            "/api/experiments/:slug/sections",
            get(catalog::get_experiment_sections),
        )
        .route(
            "/api/experiments/:slug/quiz/:quiz_type",
            get(quiz::get_quiz),
        )
        .route("/api/quiz-submissions", post(quiz::submit_quiz))
        .route("/api/feedback", post(feedback::submit_feedback))
        .route(
            "/api/progress/:experiment_slug",
            get(progress::get_progress).put(progress::put_progress),
        )
        .layer(from_fn(auth_middleware))
        .layer(Extension(auth_layer))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use vlab_core::StaticTokenProvider;
    use vlab_store::TursoLabStore;

    #[tokio::test]
    async fn test_router_has_health_endpoint() {
        let store = Arc::new(TursoLabStore::new_memory().await.unwrap());
        let state = Arc::new(AppState::new(store, Arc::new(StaticTokenProvider::new())));
        let router = create_router(state);
        let server = TestServer::new(router).unwrap();

        let response = server.get("/api/health").await;
        response.assert_status_ok();
    }
}
