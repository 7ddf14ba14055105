//! Feedback endpoint

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use vlab_core::{
    AuthContext, FeedbackError, FeedbackSubmission, RatingKey, RatingValue, overall_rating,
};

use super::{ErrorResponse, internal_error};
use crate::AppState;

/// Request body for POST /api/feedback
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub experiment_id: Option<String>,
    /// Map of rating-question key to a 1-5 value; kept loose here so a
    /// malformed shape becomes a 400, not a deserialization rejection
    pub ratings: Option<serde_json::Value>,
    pub comments: Option<String>,
}

/// Response for a recorded submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitFeedbackResponse {
    pub success: bool,
    pub data: FeedbackSubmission,
}

/// Decode the ratings object into typed values.
///
/// Fails with [`FeedbackError::MissingFields`] when the shape is not a
/// key-to-value mapping over the fixed rating questions.
fn decode_ratings(
    value: &serde_json::Value,
) -> Result<HashMap<String, RatingValue>, FeedbackError> {
    let object = value
        .as_object()
        .ok_or(FeedbackError::MissingFields("ratings"))?;
    let mut ratings = HashMap::new();
    for (key, raw) in object {
        if RatingKey::parse(key).is_none() {
            return Err(FeedbackError::MissingFields("ratings"));
        }
        let rating = match raw {
            serde_json::Value::String(s) => RatingValue::Text(s.clone()),
            serde_json::Value::Number(n) => {
                // Out-of-range numbers still flow through so the aggregator's
                // range guard produces the InvalidRating outcome
                RatingValue::Text(n.to_string())
            }
            _ => RatingValue::Text(String::new()),
        };
        ratings.insert(key.clone(), rating);
    }
    Ok(ratings)
}

/// POST /api/feedback - Record one feedback submission per (user, experiment)
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> impl IntoResponse {
    let Some(user_id) = auth.user_id() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    };

    let (Some(experiment_id), Some(ratings_value)) = (request.experiment_id, request.ratings)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    let ratings = match decode_ratings(&ratings_value) {
        Ok(ratings) => ratings,
        Err(e) => {
            tracing::debug!("rejecting feedback: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Missing required fields")),
            )
                .into_response();
        }
    };

    let rating = match overall_rating(&ratings) {
        Ok(rating) => rating,
        Err(e) => {
            tracing::debug!("rejecting feedback: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid rating value")),
            )
                .into_response();
        }
    };

    match state.store.get_experiment_by_id(&experiment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Experiment not found")),
            )
                .into_response();
        }
        Err(e) => return internal_error("loading experiment", e).into_response(),
    }

    let comments = request
        .comments
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let submission = FeedbackSubmission {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        experiment_id,
        rating,
        ratings,
        comments,
        submitted_at: chrono::Utc::now(),
    };

    match state.store.insert_feedback(&submission).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(SubmitFeedbackResponse {
                success: true,
                data: submission,
            }),
        )
            .into_response(),
        Err(vlab_store::Error::Duplicate(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Feedback already submitted")),
        )
            .into_response(),
        Err(e) => internal_error("persisting feedback", e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ratings_accepts_strings_and_numbers() {
        let value = serde_json::json!({"clarity": "4", "overall": 5});
        let ratings = decode_ratings(&value).unwrap();
        assert_eq!(ratings["clarity"].value(), Some(4));
        assert_eq!(ratings["overall"].value(), Some(5));
    }

    #[test]
    fn test_decode_ratings_rejects_non_object() {
        assert!(decode_ratings(&serde_json::json!("five")).is_err());
        assert!(decode_ratings(&serde_json::json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_decode_ratings_rejects_unknown_keys() {
        let value = serde_json::json!({"overall": "5", "vibes": "5"});
        assert_eq!(
            decode_ratings(&value),
            Err(FeedbackError::MissingFields("ratings"))
        );
    }

    #[test]
    fn test_decode_ratings_keeps_garbage_values_for_range_guard() {
        let value = serde_json::json!({"overall": {"nested": true}});
        let ratings = decode_ratings(&value).unwrap();
        assert_eq!(ratings["overall"].value(), None);
    }
}
