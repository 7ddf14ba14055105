//! Catalog read endpoints: categories, experiments, sections

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use vlab_core::{Category, Experiment, Section};

use super::{ErrorResponse, internal_error};
use crate::AppState;

/// Response for listing categories
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

/// GET /api/categories - List categories in display order
pub async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_categories().await {
        Ok(categories) => Json(CategoryListResponse { categories }).into_response(),
        Err(e) => internal_error("listing categories", e).into_response(),
    }
}

/// Response for listing a category's experiments
#[derive(Debug, Serialize, Deserialize)]
pub struct ExperimentListResponse {
    pub category: Category,
    pub experiments: Vec<Experiment>,
}

/// GET /api/categories/:slug/experiments - Published experiments in a category
pub async fn list_category_experiments(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let category = match state.store.get_category(&slug).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Category not found")),
            )
                .into_response();
        }
        Err(e) => return internal_error("loading category", e).into_response(),
    };

    match state.store.list_experiments(&category.id).await {
        Ok(experiments) => Json(ExperimentListResponse {
            category,
            experiments,
        })
        .into_response(),
        Err(e) => internal_error("listing experiments", e).into_response(),
    }
}

/// GET /api/experiments/:slug - Published experiment detail
pub async fn get_experiment(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.store.get_experiment(&slug).await {
        Ok(Some(experiment)) => Json(experiment).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Experiment not found")),
        )
            .into_response(),
        Err(e) => internal_error("loading experiment", e).into_response(),
    }
}

/// One section in the curriculum, with its navigation targets
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionView {
    /// Section label
    pub id: Section,
    /// The section that follows, None at the end
    pub next: Option<Section>,
    /// The section that precedes, None at the start
    pub previous: Option<Section>,
    /// Whether the learner must complete this section's form before advancing
    pub requires_completion: bool,
}

/// Response for the section sequencer view
#[derive(Debug, Serialize, Deserialize)]
pub struct ExperimentSectionsResponse {
    pub experiment_id: String,
    /// Where a learner entering the experiment lands
    pub initial: Section,
    pub sections: Vec<SectionView>,
}

/// GET /api/experiments/:slug/sections - The fixed curriculum for an experiment
pub async fn get_experiment_sections(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let experiment = match state.store.get_experiment(&slug).await {
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

    let sections = Section::ALL
        .iter()
        .map(|section| SectionView {
            id: *section,
            next: section.next(),
            previous: section.previous(),
            requires_completion: section.requires_completion(),
        })
        .collect();

    Json(ExperimentSectionsResponse {
        experiment_id: experiment.id,
        initial: Section::INITIAL,
        sections,
    })
    .into_response()
}
