//! Shared research query state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The record shared between the UI and the pipeline controller.
///
/// The UI writes `topic`; the controller writes `is_loading`, `progress`
/// and `active_agent`. Last write wins.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct ResearchQuery {
    /// Current contents of the topic input.
    pub topic: String,

    /// True for the whole duration of a run.
    pub is_loading: bool,

    /// Progress of the current run, `0..=100`.
    pub progress: u8,

    /// Identifier of the stage being processed, if any.
    pub active_agent: Option<String>,
}
