//! Assessment scoring
//!
//! Grades a complete answer map against a quiz's answer key. Scoring is a
//! pure function; persisting the result is the caller's job.

mod types;

use std::collections::HashMap;

pub use types::{AnswerIndex, Quiz, QuizQuestion, QuizSubmission, QuizType, Score};

use thiserror::Error;

/// Errors produced while scoring a quiz
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    /// The answer map does not cover every question exactly once
    #[error("expected {expected} answers, got {got}")]
    MissingAnswers { expected: usize, got: usize },

    /// A question's stored answer key is unusable
    #[error("invalid question definition for {question_id}: {reason}")]
    InvalidQuestionDefinition { question_id: String, reason: String },
}

/// Score a complete answer map against the quiz questions.
///
/// The answer map must hold exactly one entry per question id. Both the
/// stored correct answer and the learner's choice are normalized to an
/// integer index before comparing, since the stored form is inconsistently a
/// number or a numeric string.
///
/// The percentage is `round(100 * correct / total)` with ties rounding up.
pub fn score_quiz(
    questions: &[QuizQuestion],
    answers: &HashMap<String, AnswerIndex>,
) -> Result<Score, AssessmentError> {
    if answers.len() != questions.len() {
        return Err(AssessmentError::MissingAnswers {
            expected: questions.len(),
            got: answers.len(),
        });
    }

    let mut correct = 0u32;
    for question in questions {
        let key = question.correct_index()?;

        let chosen = answers
            .get(&question.id)
            .ok_or(AssessmentError::MissingAnswers {
                expected: questions.len(),
                got: answers.len(),
            })?;
        // A malformed learner answer can never match the key
        if chosen.index() == Some(key) {
            correct += 1;
        }
    }

    let total = questions.len() as u32;
    let percentage = if total == 0 {
        0
    } else {
        (f64::from(correct) * 100.0 / f64::from(total)).round() as u8
    };

    Ok(Score {
        correct,
        total,
        percentage,
    })
}
