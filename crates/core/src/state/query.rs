//! Shared research query state.
//!
//! `QueryState` is a cheap, cloneable handle. The UI and the pipeline
//! controller hold clones of the same handle; every update is broadcast to
//! subscribers through a `watch` channel so a renderer always sees the
//! latest snapshot.

use rk_protocol::query_models::ResearchQuery;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct QueryState {
    tx: Arc<watch::Sender<ResearchQuery>>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ResearchQuery::default());
        Self { tx: Arc::new(tx) }
    }

    /// A copy of the current record.
    pub fn snapshot(&self) -> ResearchQuery {
        self.tx.borrow().clone()
    }

    /// Receive every subsequent update.
    pub fn subscribe(&self) -> watch::Receiver<ResearchQuery> {
        self.tx.subscribe()
    }

    pub fn topic(&self) -> String {
        self.tx.borrow().topic.clone()
    }

    pub fn set_topic(&self, topic: impl Into<String>) {
        let topic = topic.into();
        self.tx.send_modify(|q| q.topic = topic);
    }

    pub fn set_loading(&self, loading: bool) {
        self.tx.send_modify(|q| q.is_loading = loading);
    }

    pub fn set_progress(&self, progress: u8) {
        self.tx.send_modify(|q| q.progress = progress);
    }

    pub fn set_active_agent(&self, agent: Option<String>) {
        self.tx.send_modify(|q| q.active_agent = agent);
    }

    /// Apply several field changes as one update.
    pub fn update(&self, modify: impl FnOnce(&mut ResearchQuery)) {
        self.tx.send_modify(modify);
    }
}
