//! Global configuration models for `.research-kit/config.toml`.
//!
//! This module defines the structure of the configuration file that
//! controls the research service endpoint, run timing and storage.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STAGE_DELAY_MS: u64 = 1000;

/// What `start_run` does when a run is already in flight.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
pub enum ReentryPolicy {
    /// Refuse the new run until the current one reaches a terminal state.
    #[default]
    Reject,

    /// Cancel the current run and start the new one.
    ///
    /// The superseded run discards its outcome.
    CancelPrevious,
}

/// A stage entry in `config.toml`. Ordinals follow list order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct StageDefinition {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub increment: Option<u8>,
}

/// Represents global settings from `.research-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .research-kit/config.toml
/// service_url = "http://localhost:5000"
/// request_timeout_secs = 30
/// stage_delay_ms = 1000
/// reentry = "cancel_previous"
///
/// [[stages]]
/// id = "generationAgent"
/// display_name = "Generation Agent"
/// increment = 20
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GlobalConfig {
    /// Base URL of the research service.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Upper bound on a single research-service call.
    #[serde(default = "default_request_timeout_secs")]
    #[ts(type = "number")]
    pub request_timeout_secs: u64,

    /// Simulated latency of each agent stage.
    #[serde(default = "default_stage_delay_ms")]
    #[ts(type = "number")]
    pub stage_delay_ms: u64,

    #[serde(default)]
    pub reentry: ReentryPolicy,

    /// Where bookmarks are stored. Relative paths resolve against the
    /// project root; defaults to `.research-kit/data`.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Overrides the built-in stage list when non-empty.
    #[serde(default)]
    pub stages: Vec<StageDefinition>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_stage_delay_ms() -> u64 {
    DEFAULT_STAGE_DELAY_MS
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            stage_delay_ms: DEFAULT_STAGE_DELAY_MS,
            reentry: ReentryPolicy::default(),
            data_dir: None,
            stages: Vec::new(),
        }
    }
}
