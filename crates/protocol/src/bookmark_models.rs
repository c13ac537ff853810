//! Persisted bookmark records.
//!
//! Field names are camelCase so the stored collection stays readable by the
//! browser client that shares the same storage record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::research_models::{Paper, ResearchResult};

/// A user-created snapshot of a completed run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,

    pub topic: String,

    pub date: DateTime<Utc>,

    pub score: f64,

    /// The run's top paper as the research service returned it, so every
    /// field the browser client saved survives a load and save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_paper: Option<Paper>,
}

impl Bookmark {
    /// Build a bookmark summarising a successful run for `topic`.
    pub fn from_result(topic: &str, result: &ResearchResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            date: Utc::now(),
            score: result.score,
            top_paper: result.top_paper.clone(),
        }
    }
}
