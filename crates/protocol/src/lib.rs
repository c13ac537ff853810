//! # rk-protocol
//!
//! Core protocol definitions and data models for research-kit.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (`.research-kit/config.toml`)
//! - Research runs, their stages and results
//! - Persisted bookmarks
//! - Events streamed from the Core to any UI
//!
//! ## Modules
//!
//! - [`stage_models`]: Agent stage definitions
//! - [`run_models`]: Runtime state of a research run
//! - [`query_models`]: Shared research query state
//! - [`research_models`]: Research service payloads
//! - [`bookmark_models`]: Persisted bookmark records
//! - [`config_models`]: Global configuration from config.toml
//! - [`ipc`]: Events for Core-UI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other research-kit crates

pub mod bookmark_models;
pub mod config_models;
pub mod ipc;
pub mod query_models;
pub mod research_models;
pub mod run_models;
pub mod stage_models;

// Re-export all public types for convenience
pub use bookmark_models::*;
pub use config_models::*;
pub use ipc::*;
pub use query_models::*;
pub use research_models::*;
pub use run_models::*;
pub use stage_models::*;
