//! vlab-store: persistence for the Virtual Lab backend
//!
//! One storage trait, [`LabStore`], covers everything the learner flow
//! touches: catalog reads (always filtered to published content), quiz and
//! question reads, and the three write paths (feedback, quiz submissions,
//! user progress). [`TursoLabStore`] is the libSQL implementation and can
//! connect to:
//! - a remote Turso database (cloud)
//! - a local embedded SQLite file
//! - an in-memory database (tests)
//!
//! Authoring writes (categories, experiments, quizzes) are deliberately not
//! on the trait; they exist as methods on [`TursoLabStore`] for seeding.

mod error;
mod seed;
mod turso;

pub use error::{Error, Result};
pub use seed::seed_default_catalog;
pub use turso::TursoLabStore;

use async_trait::async_trait;

use vlab_core::{
    Category, Experiment, FeedbackSubmission, Quiz, QuizQuestion, QuizSubmission, QuizType,
    UserProgress,
};

/// Storage operations for the learner flow.
///
/// Catalog reads only ever return published experiments; unpublished content
/// is indistinguishable from missing content at this boundary.
#[async_trait]
pub trait LabStore: Send + Sync {
    /// List all categories in display order.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Get a category by slug.
    async fn get_category(&self, slug: &str) -> Result<Option<Category>>;

    /// List published experiments in a category, newest first.
    async fn list_experiments(&self, category_id: &str) -> Result<Vec<Experiment>>;

    /// Get a published experiment by slug.
    async fn get_experiment(&self, slug: &str) -> Result<Option<Experiment>>;

    /// Get a published experiment by id.
    async fn get_experiment_by_id(&self, id: &str) -> Result<Option<Experiment>>;

    /// Get the quiz of the given type for an experiment.
    async fn get_quiz(&self, experiment_id: &str, quiz_type: QuizType) -> Result<Option<Quiz>>;

    /// Get a quiz by id.
    async fn get_quiz_by_id(&self, id: &str) -> Result<Option<Quiz>>;

    /// List a quiz's questions in display order.
    async fn list_questions(&self, quiz_id: &str) -> Result<Vec<QuizQuestion>>;

    /// Insert one feedback row. Fails with [`Error::Duplicate`] when the
    /// (user, experiment) pair already has one.
    async fn insert_feedback(&self, feedback: &FeedbackSubmission) -> Result<()>;

    /// Insert one graded quiz attempt.
    async fn insert_quiz_submission(&self, submission: &QuizSubmission) -> Result<()>;

    /// Get a learner's progress for an experiment.
    async fn get_progress(&self, user_id: &str, experiment_id: &str)
    -> Result<Option<UserProgress>>;

    /// Insert or update a learner's progress row.
    async fn upsert_progress(&self, progress: &UserProgress) -> Result<()>;
}
