//! Feedback aggregation
//!
//! Reduces a learner's per-question 1-5 ratings into one overall rating for
//! the experiment. The aggregator is pure; authorization and persistence
//! belong to the caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while aggregating feedback
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedbackError {
    /// A required field is absent or malformed
    #[error("missing required field: {0}")]
    MissingFields(&'static str),

    /// The derived overall rating fell outside 1-5
    #[error("invalid rating value")]
    InvalidRating,
}

/// The fixed set of rating questions asked on the feedback page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingKey {
    ContentQuality,
    Clarity,
    Simulation,
    Learning,
    Overall,
}

impl RatingKey {
    /// Every rating question, in display order
    pub const ALL: [RatingKey; 5] = [
        RatingKey::ContentQuality,
        RatingKey::Clarity,
        RatingKey::Simulation,
        RatingKey::Learning,
        RatingKey::Overall,
    ];

    /// Returns the snake_case key used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingKey::ContentQuality => "content_quality",
            RatingKey::Clarity => "clarity",
            RatingKey::Simulation => "simulation",
            RatingKey::Learning => "learning",
            RatingKey::Overall => "overall",
        }
    }

    /// Parse a wire key back to a rating question
    pub fn parse(s: &str) -> Option<Self> {
        RatingKey::ALL.iter().find(|k| k.as_str() == s).copied()
    }
}

/// A single 1-5 rating as submitted, either a number or a numeric string.
///
/// Form controls submit string values, so both encodings are accepted and
/// normalized through [`RatingValue::value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingValue {
    Int(u8),
    Text(String),
}

impl RatingValue {
    /// Returns the numeric rating, or None when the value is not an integer
    pub fn value(&self) -> Option<u8> {
        match self {
            RatingValue::Int(v) => Some(*v),
            RatingValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Compute the overall rating: the round-half-up mean of all submitted
/// ratings, guarded to stay within 1-5.
///
/// Partial maps are not rejected here; requiring every rating question to be
/// answered is the caller's gate. An empty map or a non-numeric value cannot
/// produce a valid mean and fails with [`FeedbackError::InvalidRating`].
pub fn overall_rating(ratings: &HashMap<String, RatingValue>) -> Result<u8, FeedbackError> {
    if ratings.is_empty() {
        return Err(FeedbackError::InvalidRating);
    }

    let mut sum = 0u32;
    for value in ratings.values() {
        let v = value.value().ok_or(FeedbackError::InvalidRating)?;
        sum += u32::from(v);
    }

    let mean = f64::from(sum) / ratings.len() as f64;
    let overall = mean.round() as i64;
    if !(1..=5).contains(&overall) {
        return Err(FeedbackError::InvalidRating);
    }
    Ok(overall as u8)
}

/// A persisted feedback row for one (user, experiment) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// Stable identifier
    pub id: String,
    /// The authenticated learner
    pub user_id: String,
    /// The experiment being rated
    pub experiment_id: String,
    /// Derived overall rating, 1-5
    pub rating: u8,
    /// The per-question ratings as submitted
    pub ratings: HashMap<String, RatingValue>,
    /// Optional free-text comments
    pub comments: Option<String>,
    /// When the feedback was recorded
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(pairs: &[(&str, &str)]) -> HashMap<String, RatingValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), RatingValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn test_all_fives_gives_five() {
        let map = ratings(&[
            ("content_quality", "5"),
            ("clarity", "5"),
            ("simulation", "5"),
            ("learning", "5"),
            ("overall", "5"),
        ]);
        assert_eq!(overall_rating(&map), Ok(5));
    }

    #[test]
    fn test_mean_rounds_half_up() {
        // mean 1.5 rounds to 2
        let map = ratings(&[("content_quality", "1"), ("clarity", "2")]);
        assert_eq!(overall_rating(&map), Ok(2));
    }

    #[test]
    fn test_mixed_encodings() {
        let mut map = ratings(&[("clarity", "4")]);
        map.insert("overall".to_string(), RatingValue::Int(3));
        // mean 3.5 rounds to 4
        assert_eq!(overall_rating(&map), Ok(4));
    }

    #[test]
    fn test_bounded_inputs_stay_in_range() {
        for a in 1u8..=5 {
            for b in 1u8..=5 {
                for c in 1u8..=5 {
                    let mut map = HashMap::new();
                    map.insert("a".to_string(), RatingValue::Int(a));
                    map.insert("b".to_string(), RatingValue::Int(b));
                    map.insert("c".to_string(), RatingValue::Int(c));
                    let overall = overall_rating(&map).unwrap();
                    assert!((1..=5).contains(&overall));
                }
            }
        }
    }

    #[test]
    fn test_empty_map_is_invalid() {
        assert_eq!(overall_rating(&HashMap::new()), Err(FeedbackError::InvalidRating));
    }

    #[test]
    fn test_non_numeric_value_is_invalid() {
        let map = ratings(&[("overall", "great")]);
        assert_eq!(overall_rating(&map), Err(FeedbackError::InvalidRating));
    }

    #[test]
    fn test_out_of_range_value_is_invalid() {
        let map = ratings(&[("overall", "9")]);
        assert_eq!(overall_rating(&map), Err(FeedbackError::InvalidRating));
    }

    #[test]
    fn test_rating_key_wire_names() {
        let names: Vec<_> = RatingKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["content_quality", "clarity", "simulation", "learning", "overall"]
        );
        let json = serde_json::to_string(&RatingKey::ContentQuality).unwrap();
        assert_eq!(json, "\"content_quality\"");
    }

    #[test]
    fn test_rating_key_parse_round_trip() {
        for key in RatingKey::ALL {
            assert_eq!(RatingKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(RatingKey::parse("vibes"), None);
    }
}
