//! Runtime state of a research run.
//!
//! This module defines the structures for tracking a single end-to-end
//! execution of the pipeline for one topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Lifecycle status of a research run.
///
/// Transitions are one-directional:
/// Idle -> Running -> Succeeded | Failed
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// No run has been started yet.
    #[default]
    Idle,

    /// Stages are executing or the research call is in flight.
    Running,

    /// The research service returned a result.
    Succeeded,

    /// Validation passed but the run ended without a result
    /// (transport failure, timeout or cancellation).
    Failed,
}

impl RunStatus {
    /// Whether the run has reached an end state.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed)
    }
}

/// Represents the runtime state of a single research run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PipelineRun {
    /// Unique identifier for this run.
    #[ts(type = "string")]
    pub id: Uuid,

    /// Trimmed topic the run was started for.
    pub topic: String,

    /// Current execution status.
    pub status: RunStatus,

    /// Zero-based index of the stage currently active (or last active).
    pub current_stage_index: usize,

    /// Progress shown to the user, clamped to `0..=100`.
    pub progress: u8,

    /// Unclamped sum of stage increments.
    ///
    /// Exceeds 100 when configured increments overshoot; `progress`
    /// never does.
    pub raw_progress: u32,

    /// When the run entered `Running`.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// When the run reached a terminal status.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,

    /// Failure message for `Failed` runs.
    #[serde(default)]
    pub error: Option<String>,
}
