//! Error types for research runs.

use crate::service::ServiceError;
use std::time::Duration;
use thiserror::Error;

/// Why a run (or an idea request) did not produce a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The submitted topic was empty after trimming. No state was changed.
    #[error("{0}")]
    Validation(String),

    /// Another run is still in flight and the re-entry policy is `reject`.
    #[error("A research run is already in progress")]
    AlreadyRunning,

    /// The run was cancelled, or superseded by a newer run.
    #[error("Research run was cancelled")]
    Cancelled,

    /// The research service did not answer in time.
    #[error("Research service did not respond within {0:?}")]
    Timeout(Duration),

    /// The research service failed or returned a non-success status.
    #[error("Research failed: {0}")]
    Transport(#[from] ServiceError),
}

/// Type alias for Result with RunError.
pub type RunResult<T> = Result<T, RunError>;
