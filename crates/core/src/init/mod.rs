//! Initialization module for creating `.research-kit` directory structures.
//!
//! This module provides functionality to initialize a project by generating
//! a `.research-kit/` directory with:
//! - A documented `config.toml` holding the default settings
//! - An empty `data/` directory for persisted records
//!
//! # Example
//!
//! ```no_run
//! use rk_core::init::{InitOptions, generate_research_kit_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//! };
//!
//! generate_research_kit_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

// Re-export commonly used types for convenience
pub use error::{InitError, InitResult};
pub use generator::{generate_research_kit_structure, InitOptions};
pub use templates::CONFIG_TEMPLATE;
