//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality across all integration tests:
//! - Test fixtures (controllers, sample results, projects)
//! - Custom assertions over event streams
//! - A local HTTP research service

pub mod assertions;
pub mod fixtures;
pub mod http_server;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
