//! Quiz and scoring types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AssessmentError;

/// Whether a quiz runs before or after the experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    Pretest,
    Posttest,
}

impl QuizType {
    /// Returns the lowercase label stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::Pretest => "pretest",
            QuizType::Posttest => "posttest",
        }
    }

    /// Parse a stored quiz type label
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pretest" => Some(QuizType::Pretest),
            "posttest" => Some(QuizType::Posttest),
            _ => None,
        }
    }
}

/// A pretest or posttest attached to an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    /// Stable identifier
    pub id: String,
    /// Owning experiment
    pub experiment_id: String,
    /// Pretest or posttest; at most one of each per experiment
    pub quiz_type: QuizType,
    /// Display title
    pub title: String,
    /// Minimum percentage required to pass, 0-100
    pub passing_percentage: u8,
}

/// An answer-option index as it appears in stored or submitted data.
///
/// The backing data is inconsistent: the answer key is a raw number in one
/// content variant and a numeric string in another, and submitted answers
/// arrive as strings from form controls. Both sides normalize through
/// [`AnswerIndex::index`] before any comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerIndex {
    Int(u32),
    Text(String),
}

impl AnswerIndex {
    /// Returns the numeric index, or None when the value is not a valid integer
    pub fn index(&self) -> Option<u32> {
        match self {
            AnswerIndex::Int(i) => Some(*i),
            AnswerIndex::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One multiple-choice question in a quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Stable identifier
    pub id: String,
    /// Owning quiz
    pub quiz_id: String,
    /// The question prompt
    pub question_text: String,
    /// Answer options, two or more
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct_answer: AnswerIndex,
    /// Shown to the learner after submission
    pub explanation: Option<String>,
    /// Position within the quiz
    pub display_order: i64,
}

impl QuizQuestion {
    /// Returns the normalized correct-answer index, validated against the
    /// options list.
    pub fn correct_index(&self) -> Result<u32, AssessmentError> {
        let index =
            self.correct_answer
                .index()
                .ok_or_else(|| AssessmentError::InvalidQuestionDefinition {
                    question_id: self.id.clone(),
                    reason: "correct answer is not a numeric index".to_string(),
                })?;
        if (index as usize) >= self.options.len() {
            return Err(AssessmentError::InvalidQuestionDefinition {
                question_id: self.id.clone(),
                reason: format!(
                    "correct answer index {} out of range for {} options",
                    index,
                    self.options.len()
                ),
            });
        }
        Ok(index)
    }
}

/// Derived result of grading one complete answer map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Number of correctly answered questions
    pub correct: u32,
    /// Number of questions in the quiz
    pub total: u32,
    /// Rounded percent correct, 0-100
    pub percentage: u8,
}

impl Score {
    /// Returns true when the score meets the quiz's passing threshold
    pub fn passes(&self, passing_percentage: u8) -> bool {
        self.percentage >= passing_percentage
    }
}

/// A persisted, graded quiz attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSubmission {
    /// Stable identifier
    pub id: String,
    /// The authenticated learner
    pub user_id: String,
    /// The quiz that was taken
    pub quiz_id: String,
    /// The answer map as submitted
    pub answers: HashMap<String, AnswerIndex>,
    /// Number of correct answers
    pub score: u32,
    /// Number of questions in the quiz
    pub total_questions: u32,
    /// Rounded percent correct
    pub percentage: u8,
    /// Whether the score met the quiz's passing threshold
    pub passed: bool,
    /// When the attempt was graded
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_type_round_trip() {
        assert_eq!(QuizType::parse("pretest"), Some(QuizType::Pretest));
        assert_eq!(QuizType::parse("posttest"), Some(QuizType::Posttest));
        assert_eq!(QuizType::parse("midterm"), None);
        assert_eq!(QuizType::Pretest.as_str(), "pretest");
    }

    #[test]
    fn test_answer_index_normalization() {
        assert_eq!(AnswerIndex::Int(3).index(), Some(3));
        assert_eq!(AnswerIndex::Text("3".into()).index(), Some(3));
        assert_eq!(AnswerIndex::Text(" 2 ".into()).index(), Some(2));
        assert_eq!(AnswerIndex::Text("abc".into()).index(), None);
        assert_eq!(AnswerIndex::Text("-1".into()).index(), None);
    }

    #[test]
    fn test_answer_index_untagged_serde() {
        let n: AnswerIndex = serde_json::from_str("1").unwrap();
        assert_eq!(n, AnswerIndex::Int(1));
        let s: AnswerIndex = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(s, AnswerIndex::Text("1".to_string()));
        assert_eq!(n.index(), s.index());
    }

    #[test]
    fn test_correct_index_in_range() {
        let q = QuizQuestion {
            id: "q1".into(),
            quiz_id: "quiz".into(),
            question_text: "?".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: AnswerIndex::Int(1),
            explanation: None,
            display_order: 1,
        };
        assert_eq!(q.correct_index().unwrap(), 1);

        let mut bad = q.clone();
        bad.correct_answer = AnswerIndex::Int(2);
        assert!(bad.correct_index().is_err());

        let mut garbled = q;
        garbled.correct_answer = AnswerIndex::Text("first".into());
        assert!(garbled.correct_index().is_err());
    }
}
