//! Experiment section sequencing and per-user progress
//!
//! Every experiment walks the same fixed curriculum:
//! aim -> theory -> pretest -> procedure -> simulation -> posttest -> feedback.
//! Learners move forward one section at a time and may navigate backward
//! freely. Advancing past a quiz requires answering every question, not
//! passing it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the sequencer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    /// A section label outside the fixed curriculum
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// One step in the fixed experiment curriculum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Aim,
    Theory,
    Pretest,
    Procedure,
    Simulation,
    Posttest,
    Feedback,
}

impl Section {
    /// Every section in curriculum order
    pub const ALL: [Section; 7] = [
        Section::Aim,
        Section::Theory,
        Section::Pretest,
        Section::Procedure,
        Section::Simulation,
        Section::Posttest,
        Section::Feedback,
    ];

    /// The section a learner lands on when opening an experiment
    pub const INITIAL: Section = Section::Aim;

    /// Returns the lowercase label used in routes and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Aim => "aim",
            Section::Theory => "theory",
            Section::Pretest => "pretest",
            Section::Procedure => "procedure",
            Section::Simulation => "simulation",
            Section::Posttest => "posttest",
            Section::Feedback => "feedback",
        }
    }

    /// The section that follows this one, or None at the end of the curriculum
    pub fn next(&self) -> Option<Section> {
        let idx = self.position();
        Section::ALL.get(idx + 1).copied()
    }

    /// The section that precedes this one, or None at the start
    pub fn previous(&self) -> Option<Section> {
        let idx = self.position();
        idx.checked_sub(1).map(|i| Section::ALL[i])
    }

    /// Zero-based position within the curriculum
    pub fn position(&self) -> usize {
        match self {
            Section::Aim => 0,
            Section::Theory => 1,
            Section::Pretest => 2,
            Section::Procedure => 3,
            Section::Simulation => 4,
            Section::Posttest => 5,
            Section::Feedback => 6,
        }
    }

    /// Whether advancing past this section requires a completed quiz or
    /// feedback form. The gate is local completion, never the score.
    pub fn requires_completion(&self) -> bool {
        matches!(
            self,
            Section::Pretest | Section::Posttest | Section::Feedback
        )
    }

    /// The active section for a request path, taken from its last segment.
    ///
    /// Returns None for paths that do not end in a section label, such as the
    /// experiment root (which redirects to [`Section::INITIAL`]).
    pub fn from_path(path: &str) -> Option<Section> {
        let last = path.trim_end_matches('/').rsplit('/').next()?;
        last.parse().ok()
    }
}

impl FromStr for Section {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .find(|section| section.as_str() == s)
            .copied()
            .ok_or_else(|| ProgressError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A learner's position within one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    /// The learner
    pub user_id: String,
    /// The experiment being worked through
    pub experiment_id: String,
    /// Where the learner currently is
    pub current_section: Section,
    /// Sections already visited, in curriculum order
    pub completed_sections: Vec<Section>,
    /// When the learner first opened the experiment
    pub started_at: DateTime<Utc>,
    /// Most recent activity
    pub last_accessed_at: DateTime<Utc>,
    /// Set once the final section is reached
    pub completed_at: Option<DateTime<Utc>>,
}

impl UserProgress {
    /// Start tracking a learner at the initial section
    pub fn start(user_id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            experiment_id: experiment_id.into(),
            current_section: Section::INITIAL,
            completed_sections: Vec::new(),
            started_at: now,
            last_accessed_at: now,
            completed_at: None,
        }
    }

    /// Move the learner to a section, marking every earlier section
    /// completed. Backward navigation never un-completes anything.
    pub fn advance_to(&mut self, section: Section) {
        self.current_section = section;
        self.last_accessed_at = Utc::now();

        for candidate in &Section::ALL[..section.position()] {
            if !self.completed_sections.contains(candidate) {
                self.completed_sections.push(*candidate);
            }
        }
        self.completed_sections.sort_by_key(Section::position);

        if section == Section::Feedback && self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }
}
