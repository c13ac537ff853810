//! Configuration loading and management.
//!
//! This module provides functionality to load and parse the configuration
//! from the `.research-kit/` directory and the environment.

pub mod error;
pub mod loader;
pub mod models;
