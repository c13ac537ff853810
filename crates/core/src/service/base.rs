//! Base `ResearchService` trait and supporting types.

use async_trait::async_trait;
use rk_protocol::research_models::{IdeaSection, ResearchResult};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Research service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The external service that performs the actual research and ranking.
#[async_trait]
pub trait ResearchService: Send + Sync {
    /// Research `topic` and return the ranked result.
    async fn research(&self, topic: &str) -> ServiceResult<ResearchResult>;

    /// Generate idea sections for `topic`.
    async fn generate_ideas(&self, topic: &str) -> ServiceResult<Vec<IdeaSection>>;
}
