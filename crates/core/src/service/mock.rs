//! Scripted research service for tests and offline runs.

use crate::service::base::{ResearchService, ServiceError, ServiceResult};
use async_trait::async_trait;
use rk_protocol::research_models::{IdeaSection, Paper, ResearchResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockResearchService {
    outcome: ServiceResult<ResearchResult>,
    ideas: ServiceResult<Vec<IdeaSection>>,
    delay: Duration,
    calls: AtomicUsize,
    topics: Mutex<Vec<String>>,
}

impl MockResearchService {
    pub fn new(outcome: ServiceResult<ResearchResult>) -> Self {
        Self {
            outcome,
            ideas: Ok(Vec::new()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            topics: Mutex::new(Vec::new()),
        }
    }

    /// Always returns `result`.
    pub fn success(result: ResearchResult) -> Self {
        Self::new(Ok(result))
    }

    /// Always fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::new(Err(ServiceError::Status {
            status,
            body: "mock failure".to_string(),
        }))
    }

    /// A canned result for running without a backend.
    pub fn offline() -> Self {
        Self::success(ResearchResult {
            score: 7.5,
            top_paper: Some(Paper {
                title: "Offline sample result".to_string(),
                authors: vec!["research-kit".to_string()],
                summary: Some("Served by the offline research service.".to_string()),
                ..Paper::default()
            }),
            insights: Some(vec!["No research service was contacted.".to_string()]),
            ..ResearchResult::default()
        })
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ideas(mut self, ideas: ServiceResult<Vec<IdeaSection>>) -> Self {
        self.ideas = ideas;
        self
    }

    /// Number of `research` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Topics received by `research`, in call order.
    pub fn topics(&self) -> Vec<String> {
        self.topics
            .lock()
            .map(|topics| topics.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResearchService for MockResearchService {
    async fn research(&self, topic: &str) -> ServiceResult<ResearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut topics) = self.topics.lock() {
            topics.push(topic.to_string());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }

    async fn generate_ideas(&self, _topic: &str) -> ServiceResult<Vec<IdeaSection>> {
        self.ideas.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success_records_calls() {
        let service = MockResearchService::success(ResearchResult {
            score: 8.5,
            ..ResearchResult::default()
        });

        let result = service.research("graphs").await.unwrap();

        assert_eq!(result.score, 8.5);
        assert_eq!(service.calls(), 1);
        assert_eq!(service.topics(), vec!["graphs"]);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let service = MockResearchService::failing(500);
        let err = service.research("graphs").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 500, .. }));
    }
}
