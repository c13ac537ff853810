//! Core-to-UI communication protocol.
//!
//! The pipeline controller reports every observable state change as an
//! `Event` on a channel, allowing the UI to stay responsive while a run
//! is in flight.
//!
//! Uses tagged enum serialization for TypeScript compatibility:
//! ```json
//! {
//!   "type": "stageStarted",
//!   "payload": {
//!     "run_id": "uuid-here",
//!     "stage_id": "rankingAgent",
//!     "ordinal": 2,
//!     "progress": 48
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::research_models::ResearchResult;
use crate::run_models::RunStatus;

/// Events sent from the Core logic to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A topic passed validation and a new run was created.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        topic: String,
    },

    /// A run's status has changed.
    RunStatusUpdate {
        #[ts(type = "string")]
        run_id: Uuid,
        status: RunStatus,
        progress: u8,
    },

    /// A stage became the active agent.
    StageStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        stage_id: String,
        ordinal: usize,
        progress: u8,
    },

    /// All stages finished and the research call was issued.
    ResearchRequested {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// The run succeeded.
    RunCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
        result: ResearchResult,
    },

    /// The run failed.
    RunError {
        #[ts(type = "string")]
        run_id: Uuid,
        error: String,
    },
}
