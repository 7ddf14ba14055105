//! Catalog types: categories, experiments, and their section content

mod content;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use content::{
    AimContent, ExperimentContent, ProcedureContent, ProcedureStep, SimulationContent,
    TheoryContent, TheorySection,
};

/// A thematic grouping of experiments (IoT, Electronics, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier
    pub id: String,
    /// URL-safe slug used in routes
    pub slug: String,
    /// Display name
    pub name: String,
    /// Short description shown on the catalog page
    pub description: Option<String>,
    /// Icon name for the UI
    pub icon: Option<String>,
    /// Accent color (hex)
    pub color: Option<String>,
    /// Position in the catalog listing
    pub display_order: i64,
}

/// Difficulty level of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Returns the lowercase label stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Parse a stored difficulty label
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

/// One guided lab unit with the fixed multi-section curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Stable identifier
    pub id: String,
    /// Owning category
    pub category_id: String,
    /// URL-safe slug used in routes
    pub slug: String,
    /// Display title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Estimated duration in minutes
    pub estimated_duration: i64,
    /// Aim section content
    pub aim: Option<AimContent>,
    /// Theory section content
    pub theory: Option<TheoryContent>,
    /// Procedure section content
    pub procedure: Option<ProcedureContent>,
    /// Simulation section content
    pub simulation: Option<SimulationContent>,
    /// Search tags
    pub tags: Vec<String>,
    /// Prerequisite knowledge, free text
    pub prerequisites: Vec<String>,
    /// Only published experiments are visible to learners
    pub published: bool,
    /// Highlighted on the landing page
    pub featured: bool,
    /// When the experiment was created
    pub created_at: DateTime<Utc>,
}

impl Experiment {
    /// Returns true when the experiment may be shown to learners
    pub fn is_visible(&self) -> bool {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trip() {
        for d in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ] {
            assert_eq!(Difficulty::parse(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Beginner).unwrap();
        assert_eq!(json, "\"beginner\"");
        let parsed: Difficulty = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(parsed, Difficulty::Advanced);
    }
}
