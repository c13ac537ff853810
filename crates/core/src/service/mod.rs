//! Research service access.
//!
//! This module provides the `ResearchService` trait (Adapter Pattern), the
//! HTTP client that talks to the real service, and a scripted mock.

pub mod base;
pub mod decode;
pub mod http_client;
pub mod mock;

pub use base::{ResearchService, ServiceError, ServiceResult};
pub use http_client::HttpResearchClient;
pub use mock::MockResearchService;
