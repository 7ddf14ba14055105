//! Quiz endpoints: fetching a quiz and grading submissions

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use vlab_core::{
    AnswerIndex, AssessmentError, AuthContext, Quiz, QuizQuestion, QuizSubmission, QuizType,
    score_quiz,
};

use super::{ErrorResponse, internal_error};
use crate::AppState;

/// Response for fetching a quiz.
///
/// The answer key ships with the questions: the client grades locally for
/// instant review, the server grades authoritatively on submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub quiz: Quiz,
    pub questions: Vec<QuizQuestion>,
}

/// GET /api/experiments/:slug/quiz/:quiz_type - Quiz with ordered questions
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path((slug, quiz_type)): Path<(String, String)>,
) -> impl IntoResponse {
    let Some(quiz_type) = QuizType::parse(&quiz_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid quiz type")),
        )
            .into_response();
    };

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

    let quiz = match state.store.get_quiz(&experiment.id, quiz_type).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Quiz not found")),
            )
                .into_response();
        }
        Err(e) => return internal_error("loading quiz", e).into_response(),
    };

    match state.store.list_questions(&quiz.id).await {
        Ok(questions) => Json(QuizResponse { quiz, questions }).into_response(),
        Err(e) => internal_error("loading quiz questions", e).into_response(),
    }
}

/// Request body for POST /api/quiz-submissions
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub quiz_id: Option<String>,
    pub answers: Option<HashMap<String, AnswerIndex>>,
}

/// Response for a graded submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub success: bool,
    pub data: QuizSubmission,
}

/// POST /api/quiz-submissions - Grade and persist a quiz attempt
///
/// Requires an authenticated learner. The answer map must cover every
/// question in the quiz; advancement is not conditioned on passing.
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<SubmitQuizRequest>,
) -> impl IntoResponse {
    let Some(user_id) = auth.user_id() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    };

    let (Some(quiz_id), Some(answers)) = (request.quiz_id, request.answers) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    let quiz = match state.store.get_quiz_by_id(&quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Quiz not found")),
            )
                .into_response();
        }
        Err(e) => return internal_error("loading quiz", e).into_response(),
    };

    let questions = match state.store.list_questions(&quiz.id).await {
        Ok(questions) => questions,
        Err(e) => return internal_error("loading quiz questions", e).into_response(),
    };

    let score = match score_quiz(&questions, &answers) {
        Ok(score) => score,
        Err(AssessmentError::MissingAnswers { expected, got }) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Expected {} answers, got {}",
                    expected, got
                ))),
            )
                .into_response();
        }
        Err(e @ AssessmentError::InvalidQuestionDefinition { .. }) => {
            tracing::warn!("unusable answer key: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
    };

    let submission = QuizSubmission {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        quiz_id: quiz.id.clone(),
        answers,
        score: score.correct,
        total_questions: score.total,
        percentage: score.percentage,
        passed: score.passes(quiz.passing_percentage),
        submitted_at: chrono::Utc::now(),
    };

    match state.store.insert_quiz_submission(&submission).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(SubmitQuizResponse {
                success: true,
                data: submission,
            }),
        )
            .into_response(),
        Err(e) => internal_error("persisting quiz submission", e).into_response(),
    }
}
