//! State management for research runs.
//!
//! This module provides:
//! - The shared research query record observed by the UI
//! - Run state machine transitions

pub mod query;
pub mod run;

pub use query::QueryState;
