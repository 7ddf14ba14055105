//! vlab-core: Core library for the Virtual Lab backend
//!
//! This crate provides the domain model and the three computations the
//! learner flow is built on:
//!
//! - **Catalog** - [`Category`], [`Experiment`] and typed section content blocks
//! - **Assessment** - [`score_quiz`] for grading a complete answer map against a quiz
//! - **Feedback** - [`overall_rating`] for reducing per-question ratings to one value
//! - **Progress** - [`Section`] sequencing over the fixed experiment curriculum
//! - **Auth** - [`AuthContext`] and the [`IdentityProvider`] seam for the external IdP
//!
//! All scoring and aggregation is pure; persistence lives in `vlab-store` and
//! the HTTP surface in `vlab-server`.

pub mod assessment;
pub mod auth;
pub mod catalog;
pub mod feedback;
pub mod progress;

// Re-export key types for convenience
pub use assessment::{
    AnswerIndex, AssessmentError, Quiz, QuizQuestion, QuizSubmission, QuizType, Score, score_quiz,
};
pub use auth::{AuthContext, AuthError, IdentityProvider, LearnerIdentity, StaticTokenProvider};
pub use catalog::{
    AimContent, Category, Difficulty, Experiment, ExperimentContent, ProcedureContent,
    ProcedureStep, SimulationContent, TheoryContent, TheorySection,
};
pub use feedback::{FeedbackError, FeedbackSubmission, RatingKey, RatingValue, overall_rating};
pub use progress::{ProgressError, Section, UserProgress};
