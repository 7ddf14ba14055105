//! Typed section content blocks
//!
//! Experiment content is authored as loose JSON. Each section has its own
//! shape, so the blocks are decoded into explicit structs at the data-access
//! boundary and validated before any handler sees them.

use serde::{Deserialize, Serialize};

/// Content for the aim section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimContent {
    /// Learning objectives
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Expected outcomes after completing the experiment
    #[serde(default)]
    pub outcomes: Vec<String>,
}

/// One titled passage in the theory section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheorySection {
    pub title: String,
    pub content: String,
}

/// Content for the theory section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryContent {
    #[serde(default)]
    pub sections: Vec<TheorySection>,
}

/// One step in the procedure section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureStep {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Content for the procedure section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureContent {
    #[serde(default)]
    pub steps: Vec<ProcedureStep>,
}

/// Content for the simulation section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationContent {
    /// GPIO pins referenced by the simulation, when hardware-flavored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpio_pins: Option<Vec<u8>>,
    /// Step-by-step instructions shown alongside the simulation
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Example code shown to the learner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    /// Key takeaways
    #[serde(default)]
    pub learning_points: Vec<String>,
}

/// A section content block tagged by which section it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "lowercase")]
pub enum ExperimentContent {
    Aim(AimContent),
    Theory(TheoryContent),
    Procedure(ProcedureContent),
    Simulation(SimulationContent),
}
