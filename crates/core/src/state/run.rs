//! Research run state machine.
//!
//! This module provides functions for managing the lifecycle of a
//! `PipelineRun`. Each transition returns the events that announce it.
//! Transitions only move forward; a request that would leave a terminal
//! state (or skip `Running`) is ignored and logged.

use chrono::Utc;
use rk_protocol::ipc::Event;
use rk_protocol::research_models::ResearchResult;
use rk_protocol::run_models::{PipelineRun, RunStatus};
use rk_protocol::stage_models::AgentStage;
use uuid::Uuid;

/// Create a new run for `topic` with Idle status.
pub fn create_run(topic: String) -> PipelineRun {
    PipelineRun {
        id: Uuid::new_v4(),
        topic,
        status: RunStatus::Idle,
        current_stage_index: 0,
        progress: 0,
        raw_progress: 0,
        started_at: None,
        finished_at: None,
        error: None,
    }
}

/// The placeholder run held before any topic has been submitted.
pub fn idle_run() -> PipelineRun {
    create_run(String::new())
}

fn refuse(run: &PipelineRun, to: RunStatus) {
    tracing::warn!(
        run_id = %run.id,
        from = ?run.status,
        to = ?to,
        "Ignoring invalid run transition"
    );
}

fn status_event(run: &PipelineRun) -> Event {
    Event::RunStatusUpdate {
        run_id: run.id,
        status: run.status,
        progress: run.progress,
    }
}

/// Transition Idle -> Running, resetting stage index and progress.
///
/// Returns the events announcing the transition; empty if it was refused.
/// Callers send them once they no longer hold any lock on the run.
pub fn start_run(run: &mut PipelineRun) -> Vec<Event> {
    if run.status != RunStatus::Idle {
        refuse(run, RunStatus::Running);
        return Vec::new();
    }

    run.status = RunStatus::Running;
    run.current_stage_index = 0;
    run.progress = 0;
    run.raw_progress = 0;
    run.started_at = Some(Utc::now());
    vec![status_event(run)]
}

/// Make `stage` the active stage and add `increment` to the progress.
///
/// The raw accumulator may exceed 100; the visible progress is clamped.
pub fn enter_stage(run: &mut PipelineRun, stage: &AgentStage, increment: u8) -> Vec<Event> {
    if run.status != RunStatus::Running {
        refuse(run, RunStatus::Running);
        return Vec::new();
    }

    run.current_stage_index = stage.ordinal;
    run.raw_progress += u32::from(increment);
    run.progress = run.raw_progress.min(100) as u8;

    vec![Event::StageStarted {
        run_id: run.id,
        stage_id: stage.id.clone(),
        ordinal: stage.ordinal,
        progress: run.progress,
    }]
}

/// Announce that every stage finished and the research call is going out.
pub fn request_research(run: &PipelineRun) -> Vec<Event> {
    vec![Event::ResearchRequested { run_id: run.id }]
}

/// Mark the run as succeeded at 100% and emit the result.
pub fn complete_run(run: &mut PipelineRun, result: &ResearchResult) -> Vec<Event> {
    if run.status != RunStatus::Running {
        refuse(run, RunStatus::Succeeded);
        return Vec::new();
    }

    run.status = RunStatus::Succeeded;
    run.progress = 100;
    run.finished_at = Some(Utc::now());
    vec![
        status_event(run),
        Event::RunCompleted {
            run_id: run.id,
            result: result.clone(),
        },
    ]
}

/// Mark the run as failed, keeping its last progress value.
pub fn fail_run(run: &mut PipelineRun, error: String) -> Vec<Event> {
    if run.status != RunStatus::Running {
        refuse(run, RunStatus::Failed);
        return Vec::new();
    }

    run.status = RunStatus::Failed;
    run.finished_at = Some(Utc::now());
    run.error = Some(error.clone());
    vec![
        status_event(run),
        Event::RunError {
            run_id: run.id,
            error,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(ordinal: usize) -> AgentStage {
        AgentStage::new(&format!("stage{ordinal}"), "Stage", ordinal)
    }

    fn running() -> PipelineRun {
        let mut run = create_run("graphs".to_string());
        start_run(&mut run);
        run
    }

    #[test]
    fn test_create_run() {
        let run = create_run("graphs".to_string());
        assert_eq!(run.topic, "graphs");
        assert_eq!(run.status, RunStatus::Idle);
        assert_eq!(run.progress, 0);
        assert!(run.started_at.is_none());
    }

    #[test]
    fn test_start_run() {
        let mut run = create_run("graphs".to_string());

        let events = start_run(&mut run);

        assert_eq!(run.status, RunStatus::Running);
        assert!(run.started_at.is_some());
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::RunStatusUpdate {
                status: RunStatus::Running,
                progress: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_enter_stage_clamps_progress() {
        let mut run = running();

        for ordinal in 0..6 {
            enter_stage(&mut run, &stage(ordinal), 20);
        }

        assert_eq!(run.raw_progress, 120);
        assert_eq!(run.progress, 100);
        assert_eq!(run.current_stage_index, 5);
    }

    #[test]
    fn test_enter_stage_requires_running() {
        let mut run = create_run("graphs".to_string());

        assert!(enter_stage(&mut run, &stage(0), 20).is_empty());
        assert_eq!(run.progress, 0);
    }

    #[test]
    fn test_complete_run() {
        let mut run = running();
        let result = ResearchResult {
            score: 8.5,
            ..ResearchResult::default()
        };

        let events = complete_run(&mut run, &result);

        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.progress, 100);
        assert!(run.finished_at.is_some());
        assert!(matches!(
            events[0],
            Event::RunStatusUpdate {
                status: RunStatus::Succeeded,
                progress: 100,
                ..
            }
        ));
        assert!(matches!(&events[1], Event::RunCompleted { result, .. } if result.score == 8.5));
    }

    #[test]
    fn test_fail_run_keeps_progress() {
        let mut run = running();
        enter_stage(&mut run, &stage(0), 16);

        let events = fail_run(&mut run, "Test error".to_string());

        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.progress, 16);
        assert_eq!(run.error.as_deref(), Some("Test error"));
        assert!(matches!(&events[1], Event::RunError { error, .. } if error == "Test error"));
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut run = running();
        fail_run(&mut run, "boom".to_string());

        let result = ResearchResult::default();
        assert!(complete_run(&mut run, &result).is_empty());
        assert!(start_run(&mut run).is_empty());
        assert!(fail_run(&mut run, "again".to_string()).is_empty());
        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.error.as_deref(), Some("boom"));
    }
}
