//! Test fixtures for controllers, results and project directories.
#![allow(dead_code)]

use rk_core::engine::{ControllerConfig, PipelineController};
use rk_core::service::ResearchService;
use rk_core::state::QueryState;
use rk_protocol::config_models::ReentryPolicy;
use rk_protocol::ipc::Event;
use rk_protocol::research_models::{Paper, Related, ResearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default stages with no simulated delay.
pub fn fast_config() -> ControllerConfig {
    ControllerConfig {
        stage_delay: Duration::ZERO,
        ..ControllerConfig::default()
    }
}

/// Default stages, one second apart. Use with a paused clock.
pub fn timed_config(reentry: ReentryPolicy) -> ControllerConfig {
    ControllerConfig {
        stage_delay: Duration::from_secs(1),
        reentry,
        ..ControllerConfig::default()
    }
}

/// Build a controller plus the receiving end of its event channel.
pub fn build_controller(
    config: ControllerConfig,
    service: Arc<dyn ResearchService>,
) -> (Arc<PipelineController>, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(256);
    let controller = PipelineController::new(config, service, QueryState::new(), tx);
    (Arc::new(controller), rx)
}

/// Everything currently buffered in `rx`.
pub fn drain_events(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// The result the research service returns for "quantum computing".
pub fn quantum_result() -> ResearchResult {
    ResearchResult {
        score: 8.5,
        top_paper: Some(Paper {
            title: "Quantum Error Correction at Scale".to_string(),
            authors: vec!["A. Author".to_string(), "B. Author".to_string()],
            summary: Some("We demonstrate logical qubits below threshold.".to_string()),
            link: Some("https://arxiv.org/abs/0000.00001".to_string()),
            ..Paper::default()
        }),
        related: Some(Related::List(vec![
            "Surface codes".to_string(),
            "Topological qubits".to_string(),
        ])),
        insights: Some(vec!["Error rates are falling quickly.".to_string()]),
        meta_feedback: Some(vec!["Strong consensus across sources.".to_string()]),
        ..ResearchResult::default()
    }
}

/// Create a temporary project directory with `.research-kit/config.toml`.
///
/// Returns a TempDir that must be kept alive for the test duration.
pub fn create_test_project(config_toml: &str) -> std::io::Result<tempfile::TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let rk_dir = temp_dir.path().join(".research-kit");
    std::fs::create_dir_all(&rk_dir)?;
    std::fs::write(rk_dir.join("config.toml"), config_toml)?;
    Ok(temp_dir)
}
