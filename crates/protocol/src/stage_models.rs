//! Agent stage definitions.
//!
//! A research run walks a fixed, ordered list of named agent stages before
//! calling the research service. The list is static configuration, not
//! user data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One named step of the simulated analysis pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct AgentStage {
    /// Stable identifier, reported as the active agent while the stage runs.
    pub id: String,

    /// Human-readable name shown in the agent activity list.
    pub display_name: String,

    /// Zero-based position in the stage sequence.
    pub ordinal: usize,

    /// Explicit progress increment for this stage.
    ///
    /// When `None` the controller spreads 100 evenly over all stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment: Option<u8>,
}

impl AgentStage {
    pub fn new(id: &str, display_name: &str, ordinal: usize) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            ordinal,
            increment: None,
        }
    }
}

/// The six stages every run goes through unless configured otherwise.
pub fn default_stages() -> Vec<AgentStage> {
    [
        ("generationAgent", "Generation Agent"),
        ("reflectionAgent", "Reflection Agent"),
        ("rankingAgent", "Ranking Agent"),
        ("evolutionAgent", "Evolution Agent"),
        ("proximityAgent", "Proximity Agent"),
        ("metaReviewAgent", "Meta-Review Agent"),
    ]
    .iter()
    .enumerate()
    .map(|(ordinal, (id, name))| AgentStage::new(id, name, ordinal))
    .collect()
}
