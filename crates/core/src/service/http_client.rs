//! HTTP client for the research service.
//!
//! Both endpoints take `POST {"topic": ...}`. Any non-2xx status is a
//! failure; the body is kept for the error message.

use crate::service::base::{ResearchService, ServiceError, ServiceResult};
use crate::service::decode::decode_research_result;
use async_trait::async_trait;
use rk_protocol::research_models::{IdeaSection, IdeasResponse, ResearchResult, TopicRequest};
use std::time::Duration;

const RESEARCH_PATH: &str = "research";
const IDEAS_PATH: &str = "innovation/generate";

/// `ResearchService` implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpResearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResearchClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds each whole request, connect through body.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ServiceResult<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_topic(&self, path: &str, topic: &str) -> ServiceResult<String> {
        let url = self.endpoint(path);
        tracing::debug!(%url, topic, "Calling research service");

        let response = self
            .client
            .post(&url)
            .json(&TopicRequest {
                topic: topic.to_string(),
            })
            .send()
            .await
            .map_err(|e| ServiceError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ServiceError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                "Research service returned an error status"
            );
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ResearchService for HttpResearchClient {
    async fn research(&self, topic: &str) -> ServiceResult<ResearchResult> {
        let body = self.post_topic(RESEARCH_PATH, topic).await?;
        decode_research_result(&body)
    }

    async fn generate_ideas(&self, topic: &str) -> ServiceResult<Vec<IdeaSection>> {
        let body = self.post_topic(IDEAS_PATH, topic).await?;
        let response: IdeasResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(response.sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpResearchClient::new("http://localhost:5000/", Duration::from_secs(1))
            .expect("Failed to build client");
        assert_eq!(client.endpoint("research"), "http://localhost:5000/research");

        let client = HttpResearchClient::new("http://host/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(IDEAS_PATH),
            "http://host/api/innovation/generate"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on loopback is essentially never listening.
        let client = HttpResearchClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = client.research("topic").await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport { .. }));
    }
}
