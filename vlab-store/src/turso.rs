//! Turso/libSQL implementation of Virtual Lab storage.
//!
//! Content blocks, tag lists, answer maps, and rating maps are stored as JSON
//! text columns; everything queried on is a plain column. Timestamps are
//! RFC 3339 strings.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database};
use tracing::{debug, instrument};

use vlab_core::{
    Category, Difficulty, Experiment, FeedbackSubmission, Quiz, QuizQuestion, QuizSubmission,
    QuizType, Section, UserProgress,
};

use super::{Error, LabStore, Result};

/// SQL schema for the categories table.
const SCHEMA_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT,
    icon TEXT,
    color TEXT,
    display_order INTEGER NOT NULL
)
"#;

/// SQL schema for the experiments table.
const SCHEMA_EXPERIMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS experiments (
    id TEXT PRIMARY KEY,
    category_id TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    estimated_duration INTEGER NOT NULL,
    aim TEXT,
    theory TEXT,
    procedure TEXT,
    simulation TEXT,
    tags TEXT NOT NULL,
    prerequisites TEXT NOT NULL,
    published INTEGER NOT NULL,
    featured INTEGER NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// SQL schema for the quizzes table.
const SCHEMA_QUIZZES: &str = r#"
CREATE TABLE IF NOT EXISTS quizzes (
    id TEXT PRIMARY KEY,
    experiment_id TEXT NOT NULL,
    quiz_type TEXT NOT NULL,
    title TEXT NOT NULL,
    passing_percentage INTEGER NOT NULL,
    UNIQUE (experiment_id, quiz_type)
)
"#;

/// SQL schema for the quiz questions table.
const SCHEMA_QUIZ_QUESTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS quiz_questions (
    id TEXT PRIMARY KEY,
    quiz_id TEXT NOT NULL,
    question_text TEXT NOT NULL,
    options TEXT NOT NULL,
    correct_answer TEXT NOT NULL,
    explanation TEXT,
    display_order INTEGER NOT NULL
)
"#;

/// SQL schema for the feedback table. One row per (user, experiment).
const SCHEMA_FEEDBACK: &str = r#"
CREATE TABLE IF NOT EXISTS feedback (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    experiment_id TEXT NOT NULL,
    rating INTEGER NOT NULL,
    ratings TEXT NOT NULL,
    comments TEXT,
    submitted_at TEXT NOT NULL,
    UNIQUE (user_id, experiment_id)
)
"#;

/// SQL schema for graded quiz attempts.
const SCHEMA_QUIZ_SUBMISSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS quiz_submissions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    quiz_id TEXT NOT NULL,
    answers TEXT NOT NULL,
    score INTEGER NOT NULL,
    total_questions INTEGER NOT NULL,
    percentage INTEGER NOT NULL,
    passed INTEGER NOT NULL,
    submitted_at TEXT NOT NULL
)
"#;

/// SQL schema for per-user progress.
const SCHEMA_USER_PROGRESS: &str = r#"
CREATE TABLE IF NOT EXISTS user_progress (
    user_id TEXT NOT NULL,
    experiment_id TEXT NOT NULL,
    current_section TEXT NOT NULL,
    completed_sections TEXT NOT NULL,
    started_at TEXT NOT NULL,
    last_accessed_at TEXT NOT NULL,
    completed_at TEXT,
    PRIMARY KEY (user_id, experiment_id)
)
"#;

/// SQL index for question ordering within a quiz.
const INDEX_QUESTIONS: &str = r#"
CREATE INDEX IF NOT EXISTS idx_questions_quiz_order
ON quiz_questions(quiz_id, display_order)
"#;

const EXPERIMENT_COLUMNS: &str = "id, category_id, slug, title, description, difficulty, \
     estimated_duration, aim, theory, procedure, simulation, tags, prerequisites, \
     published, featured, created_at";

/// Turso-backed Virtual Lab storage.
#[derive(Clone)]
pub struct TursoLabStore {
    db: Arc<Database>,
    // For in-memory stores only: a shared-cache memory database is dropped
    // when its last connection closes, so hold one open for the store's life.
    _memory_anchor: Option<Connection>,
}

impl TursoLabStore {
    /// Create a new storage instance with a local embedded database.
    pub async fn new_local(path: &Path) -> Result<Self> {
        let db = Builder::new_local(path).build().await?;
        let store = Self {
            db: Arc::new(db),
            _memory_anchor: None,
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create a new storage instance connected to a remote Turso database.
    pub async fn new_remote(url: &str, token: &str) -> Result<Self> {
        let db = Builder::new_remote(url.to_string(), token.to_string())
            .build()
            .await?;
        let store = Self {
            db: Arc::new(db),
            _memory_anchor: None,
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create a new in-memory storage instance (for testing).
    ///
    /// libSQL opens a fresh database for every plain `:memory:` connection,
    /// so use a uniquely named shared-cache URI that all of this store's
    /// connections resolve to the same database.
    pub async fn new_memory() -> Result<Self> {
        let uri = format!(
            "file:vlab-mem-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );
        let db = Builder::new_local(&uri).build().await?;
        let anchor = db.connect()?;
        let store = Self {
            db: Arc::new(db),
            _memory_anchor: Some(anchor),
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Get a database connection.
    async fn conn(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    /// Ensure the database schema exists.
    async fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn().await?;
        conn.execute(SCHEMA_CATEGORIES, ()).await?;
        conn.execute(SCHEMA_EXPERIMENTS, ()).await?;
        conn.execute(SCHEMA_QUIZZES, ()).await?;
        conn.execute(SCHEMA_QUIZ_QUESTIONS, ()).await?;
        conn.execute(SCHEMA_FEEDBACK, ()).await?;
        conn.execute(SCHEMA_QUIZ_SUBMISSIONS, ()).await?;
        conn.execute(SCHEMA_USER_PROGRESS, ()).await?;
        conn.execute(INDEX_QUESTIONS, ()).await?;
        Ok(())
    }

    /// Insert a category (authoring/seed path).
    pub async fn insert_category(&self, category: &Category) -> Result<()> {
        let conn = self.conn().await?;
        conn.execute(
            "INSERT INTO categories (id, slug, name, description, icon, color, display_order) VALUES (?, ?, ?, ?, ?, ?, ?)",
            libsql::params![
                category.id.clone(),
                category.slug.clone(),
                category.name.clone(),
                category.description.clone(),
                category.icon.clone(),
                category.color.clone(),
                category.display_order
            ],
        )
        .await?;
        Ok(())
    }

    /// Insert an experiment (authoring/seed path).
    pub async fn insert_experiment(&self, experiment: &Experiment) -> Result<()> {
        let conn = self.conn().await?;
        let aim = experiment
            .aim
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let theory = experiment
            .theory
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let procedure = experiment
            .procedure
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let simulation = experiment
            .simulation
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            "INSERT INTO experiments (id, category_id, slug, title, description, difficulty, \
             estimated_duration, aim, theory, procedure, simulation, tags, prerequisites, \
             published, featured, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            libsql::params![
                experiment.id.clone(),
                experiment.category_id.clone(),
                experiment.slug.clone(),
                experiment.title.clone(),
                experiment.description.clone(),
                experiment.difficulty.as_str(),
                experiment.estimated_duration,
                aim,
                theory,
                procedure,
                simulation,
                serde_json::to_string(&experiment.tags)?,
                serde_json::to_string(&experiment.prerequisites)?,
                experiment.published as i64,
                experiment.featured as i64,
                format_datetime(experiment.created_at)
            ],
        )
        .await?;
        Ok(())
    }

    /// Insert a quiz (authoring/seed path).
    pub async fn insert_quiz(&self, quiz: &Quiz) -> Result<()> {
        let conn = self.conn().await?;
        conn.execute(
            "INSERT INTO quizzes (id, experiment_id, quiz_type, title, passing_percentage) VALUES (?, ?, ?, ?, ?)",
            libsql::params![
                quiz.id.clone(),
                quiz.experiment_id.clone(),
                quiz.quiz_type.as_str(),
                quiz.title.clone(),
                i64::from(quiz.passing_percentage)
            ],
        )
        .await?;
        Ok(())
    }

    /// Insert a quiz question (authoring/seed path).
    pub async fn insert_question(&self, question: &QuizQuestion) -> Result<()> {
        let conn = self.conn().await?;
        conn.execute(
            "INSERT INTO quiz_questions (id, quiz_id, question_text, options, correct_answer, explanation, display_order) VALUES (?, ?, ?, ?, ?, ?, ?)",
            libsql::params![
                question.id.clone(),
                question.quiz_id.clone(),
                question.question_text.clone(),
                serde_json::to_string(&question.options)?,
                serde_json::to_string(&question.correct_answer)?,
                question.explanation.clone(),
                question.display_order
            ],
        )
        .await?;
        Ok(())
    }

    /// Parse a category from a database row.
    fn parse_category(row: &libsql::Row) -> Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            slug: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            icon: row.get(4)?,
            color: row.get(5)?,
            display_order: row.get(6)?,
        })
    }

    /// Parse an experiment from a database row.
    fn parse_experiment(row: &libsql::Row) -> Result<Experiment> {
        let difficulty_str: String = row.get(5)?;
        let difficulty = Difficulty::parse(&difficulty_str)
            .ok_or_else(|| Error::InvalidData(format!("invalid difficulty: {}", difficulty_str)))?;

        let aim: Option<String> = row.get(7)?;
        let theory: Option<String> = row.get(8)?;
        let procedure: Option<String> = row.get(9)?;
        let simulation: Option<String> = row.get(10)?;
        let tags_json: String = row.get(11)?;
        let prerequisites_json: String = row.get(12)?;
        let published: i64 = row.get(13)?;
        let featured: i64 = row.get(14)?;
        let created_at_str: String = row.get(15)?;

        Ok(Experiment {
            id: row.get(0)?,
            category_id: row.get(1)?,
            slug: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            difficulty,
            estimated_duration: row.get(6)?,
            aim: aim.as_deref().map(serde_json::from_str).transpose()?,
            theory: theory.as_deref().map(serde_json::from_str).transpose()?,
            procedure: procedure.as_deref().map(serde_json::from_str).transpose()?,
            simulation: simulation.as_deref().map(serde_json::from_str).transpose()?,
            tags: serde_json::from_str(&tags_json)?,
            prerequisites: serde_json::from_str(&prerequisites_json)?,
            published: published != 0,
            featured: featured != 0,
            created_at: parse_datetime(&created_at_str)?,
        })
    }

    /// Parse a quiz from a database row.
    fn parse_quiz(row: &libsql::Row) -> Result<Quiz> {
        let quiz_type_str: String = row.get(2)?;
        let quiz_type = QuizType::parse(&quiz_type_str)
            .ok_or_else(|| Error::InvalidData(format!("invalid quiz type: {}", quiz_type_str)))?;
        let passing: i64 = row.get(4)?;

        Ok(Quiz {
            id: row.get(0)?,
            experiment_id: row.get(1)?,
            quiz_type,
            title: row.get(3)?,
            passing_percentage: u8::try_from(passing)
                .map_err(|_| Error::InvalidData(format!("invalid passing percentage: {}", passing)))?,
        })
    }

    /// Parse a quiz question from a database row.
    fn parse_question(row: &libsql::Row) -> Result<QuizQuestion> {
        let options_json: String = row.get(3)?;
        let correct_json: String = row.get(4)?;

        Ok(QuizQuestion {
            id: row.get(0)?,
            quiz_id: row.get(1)?,
            question_text: row.get(2)?,
            options: serde_json::from_str(&options_json)?,
            correct_answer: serde_json::from_str(&correct_json)?,
            explanation: row.get(5)?,
            display_order: row.get(6)?,
        })
    }

    /// Parse a progress row.
    fn parse_progress(row: &libsql::Row) -> Result<UserProgress> {
        let current_str: String = row.get(2)?;
        let current_section: Section = current_str
            .parse()
            .map_err(|_| Error::InvalidData(format!("invalid section: {}", current_str)))?;
        let completed_json: String = row.get(3)?;
        let started_at_str: String = row.get(4)?;
        let last_accessed_str: String = row.get(5)?;
        let completed_at_str: Option<String> = row.get(6)?;

        Ok(UserProgress {
            user_id: row.get(0)?,
            experiment_id: row.get(1)?,
            current_section,
            completed_sections: serde_json::from_str(&completed_json)?,
            started_at: parse_datetime(&started_at_str)?,
            last_accessed_at: parse_datetime(&last_accessed_str)?,
            completed_at: completed_at_str
                .as_deref()
                .map(parse_datetime)
                .transpose()?,
        })
    }
}

#[async_trait]
impl LabStore for TursoLabStore {
    #[instrument(skip(self), level = "debug")]
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id, slug, name, description, icon, color, display_order FROM categories ORDER BY display_order ASC",
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(Self::parse_category(&row)?);
        }
        Ok(categories)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_category(&self, slug: &str) -> Result<Option<Category>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id, slug, name, description, icon, color, display_order FROM categories WHERE slug = ?",
                [slug],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_category(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_experiments(&self, category_id: &str) -> Result<Vec<Experiment>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {} FROM experiments WHERE category_id = ? AND published = 1 ORDER BY created_at DESC",
                    EXPERIMENT_COLUMNS
                ),
                [category_id],
            )
            .await?;

        let mut experiments = Vec::new();
        while let Some(row) = rows.next().await? {
            experiments.push(Self::parse_experiment(&row)?);
        }
        Ok(experiments)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_experiment(&self, slug: &str) -> Result<Option<Experiment>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {} FROM experiments WHERE slug = ? AND published = 1",
                    EXPERIMENT_COLUMNS
                ),
                [slug],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_experiment(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_experiment_by_id(&self, id: &str) -> Result<Option<Experiment>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {} FROM experiments WHERE id = ? AND published = 1",
                    EXPERIMENT_COLUMNS
                ),
                [id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_experiment(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_quiz(&self, experiment_id: &str, quiz_type: QuizType) -> Result<Option<Quiz>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id, experiment_id, quiz_type, title, passing_percentage FROM quizzes WHERE experiment_id = ? AND quiz_type = ?",
                libsql::params![experiment_id, quiz_type.as_str()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_quiz(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_quiz_by_id(&self, id: &str) -> Result<Option<Quiz>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id, experiment_id, quiz_type, title, passing_percentage FROM quizzes WHERE id = ?",
                [id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_quiz(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_questions(&self, quiz_id: &str) -> Result<Vec<QuizQuestion>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id, quiz_id, question_text, options, correct_answer, explanation, display_order FROM quiz_questions WHERE quiz_id = ? ORDER BY display_order ASC",
                [quiz_id],
            )
            .await?;

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(Self::parse_question(&row)?);
        }
        Ok(questions)
    }

    #[instrument(skip(self, feedback), level = "debug")]
    async fn insert_feedback(&self, feedback: &FeedbackSubmission) -> Result<()> {
        let conn = self.conn().await?;

        debug!(experiment_id = %feedback.experiment_id, "inserting feedback");
        // The UNIQUE (user_id, experiment_id) constraint is the single
        // arbiter, so concurrent submissions cannot both get through.
        let result = conn
            .execute(
                "INSERT INTO feedback (id, user_id, experiment_id, rating, ratings, comments, submitted_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
                libsql::params![
                    feedback.id.clone(),
                    feedback.user_id.clone(),
                    feedback.experiment_id.clone(),
                    i64::from(feedback.rating),
                    serde_json::to_string(&feedback.ratings)?,
                    feedback.comments.clone(),
                    format_datetime(feedback.submitted_at)
                ],
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(Error::Duplicate(format!(
                "feedback for experiment {} by user {}",
                feedback.experiment_id, feedback.user_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, submission), level = "debug")]
    async fn insert_quiz_submission(&self, submission: &QuizSubmission) -> Result<()> {
        let conn = self.conn().await?;
        debug!(quiz_id = %submission.quiz_id, "inserting quiz submission");
        conn.execute(
            "INSERT INTO quiz_submissions (id, user_id, quiz_id, answers, score, total_questions, percentage, passed, submitted_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            libsql::params![
                submission.id.clone(),
                submission.user_id.clone(),
                submission.quiz_id.clone(),
                serde_json::to_string(&submission.answers)?,
                i64::from(submission.score),
                i64::from(submission.total_questions),
                i64::from(submission.percentage),
                submission.passed as i64,
                format_datetime(submission.submitted_at)
            ],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_progress(
        &self,
        user_id: &str,
        experiment_id: &str,
    ) -> Result<Option<UserProgress>> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT user_id, experiment_id, current_section, completed_sections, started_at, last_accessed_at, completed_at FROM user_progress WHERE user_id = ? AND experiment_id = ?",
                libsql::params![user_id, experiment_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_progress(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self, progress), level = "debug")]
    async fn upsert_progress(&self, progress: &UserProgress) -> Result<()> {
        let conn = self.conn().await?;
        conn.execute(
            "INSERT INTO user_progress (user_id, experiment_id, current_section, completed_sections, started_at, last_accessed_at, completed_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, experiment_id) DO UPDATE SET \
             current_section = excluded.current_section, \
             completed_sections = excluded.completed_sections, \
             last_accessed_at = excluded.last_accessed_at, \
             completed_at = excluded.completed_at",
            libsql::params![
                progress.user_id.clone(),
                progress.experiment_id.clone(),
                progress.current_section.as_str(),
                serde_json::to_string(&progress.completed_sections)?,
                format_datetime(progress.started_at),
                format_datetime(progress.last_accessed_at),
                progress.completed_at.map(format_datetime)
            ],
        )
        .await?;
        Ok(())
    }
}

/// Whether a libSQL error is a UNIQUE/primary-key constraint failure.
fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}

/// Format a datetime for storage.
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a datetime from storage.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidData(format!("invalid datetime: {}", s)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use vlab_core::{AnswerIndex, RatingValue};

    use super::*;
    use crate::seed_default_catalog;

    async fn seeded_store() -> TursoLabStore {
        let store = TursoLabStore::new_memory().await.unwrap();
        seed_default_catalog(&store).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_categories_ordered_by_display_order() {
        let store = seeded_store().await;
        let categories = store.list_categories().await.unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].slug, "iot");
        assert!(categories.windows(2).all(|w| w[0].display_order <= w[1].display_order));
    }

    #[tokio::test]
    async fn test_get_experiment_by_slug() {
        let store = seeded_store().await;
        let experiment = store
            .get_experiment("raspberry-pi-intro")
            .await
            .unwrap()
            .expect("seeded experiment");
        assert_eq!(experiment.title, "Introduction to Raspberry Pi");
        assert_eq!(experiment.difficulty, Difficulty::Beginner);
        assert!(experiment.aim.is_some());
        assert!(experiment.simulation.is_some());
    }

    #[tokio::test]
    async fn test_unpublished_experiment_is_invisible() {
        let store = seeded_store().await;
        let mut hidden = store
            .get_experiment("raspberry-pi-intro")
            .await
            .unwrap()
            .unwrap();
        hidden.id = "exp-hidden".to_string();
        hidden.slug = "hidden-experiment".to_string();
        hidden.published = false;
        store.insert_experiment(&hidden).await.unwrap();

        assert!(store.get_experiment("hidden-experiment").await.unwrap().is_none());
        assert!(store.get_experiment_by_id("exp-hidden").await.unwrap().is_none());

        let listed = store.list_experiments(&hidden.category_id).await.unwrap();
        assert!(listed.iter().all(|e| e.slug != "hidden-experiment"));
    }

    #[tokio::test]
    async fn test_quiz_and_questions_round_trip() {
        let store = seeded_store().await;
        let experiment = store.get_experiment("raspberry-pi-intro").await.unwrap().unwrap();
        let quiz = store
            .get_quiz(&experiment.id, QuizType::Pretest)
            .await
            .unwrap()
            .expect("seeded pretest");
        assert_eq!(quiz.passing_percentage, 70);

        let questions = store.list_questions(&quiz.id).await.unwrap();
        assert!(questions.len() >= 2);
        assert!(questions.windows(2).all(|w| w[0].display_order <= w[1].display_order));
        for question in &questions {
            assert!(question.correct_index().is_ok());
        }
    }

    #[tokio::test]
    async fn test_feedback_insert_and_duplicate() {
        let store = seeded_store().await;
        let experiment = store.get_experiment("raspberry-pi-intro").await.unwrap().unwrap();

        let mut ratings = HashMap::new();
        ratings.insert("overall".to_string(), RatingValue::Text("5".to_string()));
        let feedback = FeedbackSubmission {
            id: "fb-1".to_string(),
            user_id: "user_1".to_string(),
            experiment_id: experiment.id.clone(),
            rating: 5,
            ratings,
            comments: Some("great lab".to_string()),
            submitted_at: Utc::now(),
        };

        store.insert_feedback(&feedback).await.unwrap();

        let mut again = feedback.clone();
        again.id = "fb-2".to_string();
        let err = store.insert_feedback(&again).await.unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_quiz_submission_insert() {
        let store = seeded_store().await;
        let experiment = store.get_experiment("raspberry-pi-intro").await.unwrap().unwrap();
        let quiz = store.get_quiz(&experiment.id, QuizType::Posttest).await.unwrap().unwrap();

        let mut answers = HashMap::new();
        answers.insert("any".to_string(), AnswerIndex::Int(1));
        let submission = QuizSubmission {
            id: "sub-1".to_string(),
            user_id: "user_1".to_string(),
            quiz_id: quiz.id.clone(),
            answers,
            score: 1,
            total_questions: 1,
            percentage: 100,
            passed: true,
            submitted_at: Utc::now(),
        };
        store.insert_quiz_submission(&submission).await.unwrap();
    }

    #[tokio::test]
    async fn test_local_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vlab.db");
        {
            let store = TursoLabStore::new_local(&path).await.unwrap();
            seed_default_catalog(&store).await.unwrap();
        }
        let store = TursoLabStore::new_local(&path).await.unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_progress_upsert_round_trip() {
        let store = seeded_store().await;
        let experiment = store.get_experiment("raspberry-pi-intro").await.unwrap().unwrap();

        let mut progress = UserProgress::start("user_1", experiment.id.clone());
        store.upsert_progress(&progress).await.unwrap();

        progress.advance_to(Section::Procedure);
        store.upsert_progress(&progress).await.unwrap();

        let loaded = store
            .get_progress("user_1", &experiment.id)
            .await
            .unwrap()
            .expect("progress row");
        assert_eq!(loaded.current_section, Section::Procedure);
        assert_eq!(
            loaded.completed_sections,
            vec![Section::Aim, Section::Theory, Section::Pretest]
        );
        assert!(loaded.completed_at.is_none());
    }
}
