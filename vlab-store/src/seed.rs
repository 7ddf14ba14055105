//! Default catalog seeding.
//!
//! Mirrors the authoring side of the product: three categories and the
//! Raspberry Pi introductory experiment with its pretest and posttest.
//! Seeding is idempotent; it does nothing when categories already exist.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use vlab_core::{
    AimContent, AnswerIndex, Category, Difficulty, Experiment, ProcedureContent, ProcedureStep,
    Quiz, QuizQuestion, QuizType, SimulationContent, TheoryContent, TheorySection,
};

use super::{LabStore, Result, TursoLabStore};

/// Seed the default catalog into an empty store. Returns true when data was
/// written, false when the store was already seeded.
pub async fn seed_default_catalog(store: &TursoLabStore) -> Result<bool> {
    if !store.list_categories().await?.is_empty() {
        info!("catalog already seeded, skipping");
        return Ok(false);
    }

    let categories = [
        Category {
            id: Uuid::new_v4().to_string(),
            slug: "iot".to_string(),
            name: "Internet of Things".to_string(),
            description: Some("Learn about IoT devices, sensors, and connectivity".to_string()),
            icon: Some("Cpu".to_string()),
            color: Some("#10b981".to_string()),
            display_order: 1,
        },
        Category {
            id: Uuid::new_v4().to_string(),
            slug: "electronics".to_string(),
            name: "Electronics".to_string(),
            description: Some(
                "Explore circuits, components, and electronic systems".to_string(),
            ),
            icon: Some("Zap".to_string()),
            color: Some("#f59e0b".to_string()),
            display_order: 2,
        },
        Category {
            id: Uuid::new_v4().to_string(),
            slug: "computer-science".to_string(),
            name: "Computer Science".to_string(),
            description: Some(
                "Study algorithms, data structures, and programming".to_string(),
            ),
            icon: Some("Code".to_string()),
            color: Some("#3b82f6".to_string()),
            display_order: 3,
        },
    ];
    for category in &categories {
        store.insert_category(category).await?;
    }

    let experiment = Experiment {
        id: Uuid::new_v4().to_string(),
        category_id: categories[0].id.clone(),
        slug: "raspberry-pi-intro".to_string(),
        title: "Introduction to Raspberry Pi".to_string(),
        description: "Learn the basics of Raspberry Pi, its components, and how to set it up \
                      for your first project."
            .to_string(),
        difficulty: Difficulty::Beginner,
        estimated_duration: 45,
        aim: Some(AimContent {
            objectives: vec![
                "Understand what Raspberry Pi is and its applications".to_string(),
                "Identify the key components of a Raspberry Pi board".to_string(),
                "Set up Raspberry Pi OS and connect peripherals".to_string(),
                "Learn about GPIO pins and their functions".to_string(),
                "Write and run a simple Python program on Raspberry Pi".to_string(),
            ],
            outcomes: vec![
                "Successfully boot and configure Raspberry Pi".to_string(),
                "Navigate the Raspberry Pi OS interface".to_string(),
                "Understand GPIO pin layout and numbering".to_string(),
                "Execute basic Python scripts".to_string(),
                "Prepare for hardware interfacing projects".to_string(),
            ],
        }),
        theory: Some(TheoryContent {
            sections: vec![TheorySection {
                title: "What is Raspberry Pi?".to_string(),
                content: "Raspberry Pi is a series of small single-board computers developed \
                          by the Raspberry Pi Foundation."
                    .to_string(),
            }],
        }),
        procedure: Some(ProcedureContent {
            steps: vec![ProcedureStep {
                title: "Unboxing and Initial Setup".to_string(),
                description: "Prepare your Raspberry Pi for first use".to_string(),
                instructions: vec![
                    "Carefully remove the Raspberry Pi from its packaging".to_string(),
                    "Check all components".to_string(),
                    "Inspect for damage".to_string(),
                ],
            }],
        }),
        simulation: Some(SimulationContent {
            gpio_pins: Some(vec![17, 18, 27, 22]),
            instructions: vec![
                "Connect LED to GPIO pin".to_string(),
                "Run the Python code".to_string(),
            ],
            code_example: Some(
                "import RPi.GPIO as GPIO\nGPIO.setmode(GPIO.BCM)\nGPIO.setup(17, GPIO.OUT)"
                    .to_string(),
            ),
            learning_points: vec!["GPIO basics".to_string(), "LED control".to_string()],
        }),
        tags: vec!["raspberry-pi".to_string(), "iot".to_string(), "gpio".to_string()],
        prerequisites: vec!["Basic computer knowledge".to_string()],
        published: true,
        featured: true,
        created_at: Utc::now(),
    };
    store.insert_experiment(&experiment).await?;

    let pretest = Quiz {
        id: Uuid::new_v4().to_string(),
        experiment_id: experiment.id.clone(),
        quiz_type: QuizType::Pretest,
        title: "Raspberry Pi Pre-Assessment".to_string(),
        passing_percentage: 70,
    };
    store.insert_quiz(&pretest).await?;
    store
        .insert_question(&QuizQuestion {
            id: Uuid::new_v4().to_string(),
            quiz_id: pretest.id.clone(),
            question_text: "What does GPIO stand for in Raspberry Pi?".to_string(),
            options: vec![
                "General Purpose Input Only".to_string(),
                "General Purpose Input/Output".to_string(),
                "Graphics Processing Input/Output".to_string(),
                "General Processing Interface Organizer".to_string(),
            ],
            correct_answer: AnswerIndex::Int(1),
            explanation: Some("GPIO stands for General Purpose Input/Output".to_string()),
            display_order: 1,
        })
        .await?;
    store
        .insert_question(&QuizQuestion {
            id: Uuid::new_v4().to_string(),
            quiz_id: pretest.id.clone(),
            question_text: "Which operating system is commonly used on Raspberry Pi?".to_string(),
            options: vec![
                "Windows 11".to_string(),
                "macOS".to_string(),
                "Raspberry Pi OS (formerly Raspbian)".to_string(),
                "Android".to_string(),
            ],
            correct_answer: AnswerIndex::Int(2),
            explanation: Some("Raspberry Pi OS is the official operating system".to_string()),
            display_order: 2,
        })
        .await?;

    let posttest = Quiz {
        id: Uuid::new_v4().to_string(),
        experiment_id: experiment.id.clone(),
        quiz_type: QuizType::Posttest,
        title: "Raspberry Pi Post-Assessment".to_string(),
        passing_percentage: 70,
    };
    store.insert_quiz(&posttest).await?;
    store
        .insert_question(&QuizQuestion {
            id: Uuid::new_v4().to_string(),
            quiz_id: posttest.id.clone(),
            question_text: "When a GPIO pin is set to HIGH state, what voltage does it output?"
                .to_string(),
            options: vec![
                "5V".to_string(),
                "3.3V".to_string(),
                "1.8V".to_string(),
                "12V".to_string(),
            ],
            // Stored as a numeric string in one content variant; the scorer
            // normalizes both encodings.
            correct_answer: AnswerIndex::Text("1".to_string()),
            explanation: Some("Raspberry Pi GPIO pins output 3.3V when set to HIGH".to_string()),
            display_order: 1,
        })
        .await?;

    info!(experiment = %experiment.slug, "seeded default catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = TursoLabStore::new_memory().await.unwrap();
        assert!(seed_default_catalog(&store).await.unwrap());
        assert!(!seed_default_catalog(&store).await.unwrap());
        assert_eq!(store.list_categories().await.unwrap().len(), 3);
    }
}
