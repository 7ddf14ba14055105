//! Per-user progress endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use vlab_core::{AuthContext, Section, UserProgress};

use super::{ErrorResponse, internal_error};
use crate::AppState;

/// Request body for PUT /api/progress/:experiment_slug
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub current_section: Option<String>,
}

/// Response wrapping a progress row
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub success: bool,
    pub data: UserProgress,
}

/// GET /api/progress/:experiment_slug - The caller's progress for an experiment
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(experiment_slug): Path<String>,
) -> impl IntoResponse {
    let Some(user_id) = auth.user_id() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    };

    let experiment = match state.store.get_experiment(&experiment_slug).await {
        Ok(Some(experiment)) => experiment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Experiment not found")),
            )
                .into_response();
        }
        Err(e) => return internal_error("loading experiment", e).into_response(),
    };

    match state.store.get_progress(user_id, &experiment.id).await {
        Ok(Some(progress)) => Json(ProgressResponse {
            success: true,
            data: progress,
        })
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No progress recorded")),
        )
            .into_response(),
        Err(e) => internal_error("loading progress", e).into_response(),
    }
}

/// PUT /api/progress/:experiment_slug - Move the caller to a section
///
/// Marks every earlier section completed; backward navigation is always
/// allowed and never un-completes anything.
pub async fn put_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(experiment_slug): Path<String>,
    Json(request): Json<UpdateProgressRequest>,
) -> impl IntoResponse {
    let Some(user_id) = auth.user_id() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    };

    let Some(section_label) = request.current_section else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    let section: Section = match section_label.parse() {
        Ok(section) => section,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
    };

    let experiment = match state.store.get_experiment(&experiment_slug).await {
        Ok(Some(experiment)) => experiment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Experiment not found")),
            )
                .into_response();
        }
        Err(e) => return internal_error("loading experiment", e).into_response(),
    };

    let mut progress = match state.store.get_progress(user_id, &experiment.id).await {
        Ok(Some(progress)) => progress,
        Ok(None) => UserProgress::start(user_id, experiment.id.clone()),
        Err(e) => return internal_error("loading progress", e).into_response(),
    };
    progress.advance_to(section);

    match state.store.upsert_progress(&progress).await {
        Ok(()) => Json(ProgressResponse {
            success: true,
            data: progress,
        })
        .into_response(),
        Err(e) => internal_error("persisting progress", e).into_response(),
    }
}
