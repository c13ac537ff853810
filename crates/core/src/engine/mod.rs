//! Pipeline controller.
//!
//! The `PipelineController` validates a topic, walks the configured agent
//! stages one at a time with a simulated delay between them, then calls the
//! research service and reports a single terminal outcome. Progress and the
//! active agent are mirrored into the shared `QueryState` and streamed as
//! `Event`s.

pub mod error;

pub use error::{RunError, RunResult};

use crate::service::ResearchService;
use crate::state::query::QueryState;
use crate::state::run as run_state;
use rk_protocol::config_models::{GlobalConfig, ReentryPolicy};
use rk_protocol::ipc::Event;
use rk_protocol::research_models::{IdeaSection, ResearchResult};
use rk_protocol::run_models::{PipelineRun, RunStatus};
use rk_protocol::stage_models::{default_stages, AgentStage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

const EMPTY_TOPIC_MESSAGE: &str = "Please enter a research topic";

/// Run timing and policy, resolved from `GlobalConfig`.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Stages in execution order.
    pub stages: Vec<AgentStage>,
    /// Simulated latency of each stage.
    pub stage_delay: Duration,
    /// Upper bound on the research call.
    pub request_timeout: Duration,
    pub reentry: ReentryPolicy,
}

impl ControllerConfig {
    pub fn from_global(global: &GlobalConfig) -> Self {
        let stages = if global.stages.is_empty() {
            default_stages()
        } else {
            global
                .stages
                .iter()
                .enumerate()
                .map(|(ordinal, def)| AgentStage {
                    id: def.id.clone(),
                    display_name: def.display_name.clone(),
                    ordinal,
                    increment: def.increment,
                })
                .collect()
        };

        Self {
            stages,
            stage_delay: Duration::from_millis(global.stage_delay_ms),
            request_timeout: Duration::from_secs(global.request_timeout_secs),
            reentry: global.reentry,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from_global(&GlobalConfig::default())
    }
}

struct ControllerState {
    run: PipelineRun,
    result: Option<ResearchResult>,
    /// Bumped whenever a run is installed or the controller is reset.
    /// A run whose generation is no longer current must not write state.
    generation: u64,
    cancel: Option<CancellationToken>,
}

/// Executes research runs and owns their `PipelineRun` and `ResearchResult`.
///
/// Construct once per process and share it (`Arc<PipelineController>`);
/// every method takes `&self`.
pub struct PipelineController {
    config: ControllerConfig,
    service: Arc<dyn ResearchService>,
    query: QueryState,
    events_tx: Sender<Event>,
    state: Mutex<ControllerState>,
}

impl PipelineController {
    /// Create a new controller.
    ///
    /// # Arguments
    ///
    /// * `config` - Stage list, timing and re-entry policy
    /// * `service` - The research service to call after the last stage
    /// * `query` - Shared query state updated as the run progresses
    /// * `events_tx` - Channel for sending events to the UI. The receiver
    ///   must be drained; a full channel stalls the run until it is cancelled.
    pub fn new(
        config: ControllerConfig,
        service: Arc<dyn ResearchService>,
        query: QueryState,
        events_tx: Sender<Event>,
    ) -> Self {
        Self {
            config,
            service,
            query,
            events_tx,
            state: Mutex::new(ControllerState {
                run: run_state::idle_run(),
                result: None,
                generation: 0,
                cancel: None,
            }),
        }
    }

    pub fn stages(&self) -> &[AgentStage] {
        &self.config.stages
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Progress added when `stage` becomes active.
    ///
    /// Defaults to an even share of 100 so the stages alone never overshoot.
    pub fn increment_for(&self, stage: &AgentStage) -> u8 {
        stage.increment.unwrap_or_else(|| match self.config.stages.len() {
            0 => 0,
            count => (100 / count) as u8,
        })
    }

    /// Snapshot of the current (or most recent) run.
    pub async fn current_run(&self) -> PipelineRun {
        self.state.lock().await.run.clone()
    }

    /// The result of the most recent successful run, if not superseded.
    pub async fn result(&self) -> Option<ResearchResult> {
        self.state.lock().await.result.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.run.status == RunStatus::Running
    }

    /// Run the pipeline for `topic` and return its result.
    ///
    /// This is the main entry point for a research run. It:
    /// 1. Rejects an empty (after trimming) topic without touching any state
    /// 2. Applies the re-entry policy if a run is already in flight
    /// 3. Walks every stage in order, updating progress and the active agent
    /// 4. Calls the research service, bounded by the request timeout
    /// 5. Records the terminal outcome and clears the loading flag
    ///
    /// # Errors
    ///
    /// Returns a `RunError` describing why no result was produced. Every
    /// error other than `Validation` and `AlreadyRunning` leaves the run in
    /// `Failed` (or, for a superseded run, leaves state to its successor).
    pub async fn start_run(&self, topic: &str) -> RunResult<ResearchResult> {
        let topic = validate_topic(topic)?;
        let (generation, token, mut run) = self.begin(topic).await?;

        tracing::info!(run_id = %run.id, topic = %run.topic, "Starting research run");

        let outcome = self.execute(generation, &token, &mut run).await;
        self.finish(generation, &token, &mut run, outcome).await
    }

    /// Cooperatively cancel the run in flight.
    ///
    /// Returns false if nothing was running. The run observes the
    /// cancellation at its next suspension point and ends `Failed`.
    pub async fn cancel(&self) -> bool {
        let state = self.state.lock().await;
        match (&state.cancel, state.run.status) {
            (Some(token), RunStatus::Running) => {
                tracing::info!(run_id = %state.run.id, "Cancelling research run");
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Abandon any run in flight and return to a fresh `Idle` run.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        if let Some(token) = state.cancel.take() {
            token.cancel();
        }
        state.generation += 1;
        state.run = run_state::idle_run();
        state.result = None;

        self.query.update(|q| {
            q.is_loading = false;
            q.progress = 0;
            q.active_agent = None;
        });
    }

    /// Ask the idea-generation service for ideas about `topic`.
    ///
    /// Independent of the run state machine.
    pub async fn generate_ideas(&self, topic: &str) -> RunResult<Vec<IdeaSection>> {
        let topic = validate_topic(topic)?;
        let timeout = self.config.request_timeout;

        match tokio::time::timeout(timeout, self.service.generate_ideas(&topic)).await {
            Ok(Ok(sections)) => Ok(sections),
            Ok(Err(e)) => {
                tracing::warn!(topic = %topic, error = %e, "Idea generation failed");
                Err(e.into())
            }
            Err(_) => Err(RunError::Timeout(timeout)),
        }
    }

    /// Apply the re-entry policy and install a new running run.
    ///
    /// State and query are written under the lock; events go out after it
    /// is released.
    async fn begin(&self, topic: String) -> RunResult<(u64, CancellationToken, PipelineRun)> {
        let mut state = self.state.lock().await;

        if state.run.status == RunStatus::Running {
            match self.config.reentry {
                ReentryPolicy::Reject => {
                    tracing::warn!(
                        run_id = %state.run.id,
                        "Rejecting run while another is in progress"
                    );
                    return Err(RunError::AlreadyRunning);
                }
                ReentryPolicy::CancelPrevious => {
                    tracing::info!(run_id = %state.run.id, "Superseding run in progress");
                    if let Some(previous) = state.cancel.take() {
                        previous.cancel();
                    }
                }
            }
        }

        let token = CancellationToken::new();
        let mut run = run_state::create_run(topic);
        let mut events = vec![Event::RunStarted {
            run_id: run.id,
            topic: run.topic.clone(),
        }];
        events.extend(run_state::start_run(&mut run));

        state.generation += 1;
        state.run = run.clone();
        state.result = None;
        state.cancel = Some(token.clone());
        self.query.update(|q| {
            q.is_loading = true;
            q.progress = 0;
            q.active_agent = None;
        });
        let generation = state.generation;
        drop(state);

        self.emit(&token, events).await;
        Ok((generation, token, run))
    }

    /// Stages then the research call. Stops at the first cancellation.
    async fn execute(
        &self,
        generation: u64,
        token: &CancellationToken,
        run: &mut PipelineRun,
    ) -> RunResult<ResearchResult> {
        for stage in &self.config.stages {
            if token.is_cancelled() {
                return Err(RunError::Cancelled);
            }

            let increment = self.increment_for(stage);
            let events = run_state::enter_stage(run, stage, increment);
            if !self.publish_stage(generation, run, stage).await {
                return Err(RunError::Cancelled);
            }
            self.emit(token, events).await;
            tracing::debug!(
                run_id = %run.id,
                stage = %stage.id,
                progress = run.progress,
                "Stage started"
            );

            tokio::select! {
                _ = token.cancelled() => return Err(RunError::Cancelled),
                _ = tokio::time::sleep(self.config.stage_delay) => {}
            }
        }

        if token.is_cancelled() {
            return Err(RunError::Cancelled);
        }
        self.emit(token, run_state::request_research(run)).await;

        let timeout = self.config.request_timeout;
        tokio::select! {
            _ = token.cancelled() => Err(RunError::Cancelled),
            response = tokio::time::timeout(timeout, self.service.research(&run.topic)) => {
                match response {
                    Ok(Ok(result)) => Ok(result),
                    Ok(Err(e)) => Err(RunError::Transport(e)),
                    Err(_) => Err(RunError::Timeout(timeout)),
                }
            }
        }
    }

    /// Record the terminal outcome, unless this run has been superseded.
    async fn finish(
        &self,
        generation: u64,
        token: &CancellationToken,
        run: &mut PipelineRun,
        outcome: RunResult<ResearchResult>,
    ) -> RunResult<ResearchResult> {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::info!(run_id = %run.id, "Discarding outcome of superseded run");
            return Err(RunError::Cancelled);
        }

        // A result that lands after cancellation is still discarded.
        let outcome = match outcome {
            Ok(_) if token.is_cancelled() => Err(RunError::Cancelled),
            other => other,
        };

        match outcome {
            Ok(result) => {
                let events = run_state::complete_run(run, &result);
                state.run = run.clone();
                state.result = Some(result.clone());
                state.cancel = None;
                self.query.update(|q| {
                    q.is_loading = false;
                    q.progress = 100;
                    q.active_agent = None;
                });
                drop(state);

                self.emit(token, events).await;
                tracing::info!(run_id = %run.id, score = result.score, "Research run succeeded");
                Ok(result)
            }
            Err(error) => {
                let events = run_state::fail_run(run, error.to_string());
                state.run = run.clone();
                state.cancel = None;
                self.query.update(|q| {
                    q.is_loading = false;
                    q.active_agent = None;
                });
                drop(state);

                self.emit(token, events).await;
                tracing::warn!(run_id = %run.id, error = %error, "Research run failed");
                Err(error)
            }
        }
    }

    /// Store `run` as the current run and make `stage` the active agent,
    /// if this run still owns the controller.
    async fn publish_stage(&self, generation: u64, run: &PipelineRun, stage: &AgentStage) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            return false;
        }
        state.run = run.clone();
        self.query.update(|q| {
            q.active_agent = Some(stage.id.clone());
            q.progress = run.progress;
        });
        true
    }

    /// Send `events` in order without holding the state lock.
    ///
    /// A send waits for channel capacity until `token` is cancelled. From
    /// then on events are only delivered if there is room, so a cancelled
    /// run can always finish even when nobody drains the channel.
    async fn emit(&self, token: &CancellationToken, events: Vec<Event>) {
        for event in events {
            if !token.is_cancelled() {
                tokio::select! {
                    permit = self.events_tx.reserve() => {
                        if let Ok(permit) = permit {
                            permit.send(event);
                        }
                        continue;
                    }
                    _ = token.cancelled() => {}
                }
            }

            if let Err(e) = self.events_tx.try_send(event) {
                tracing::debug!(error = %e, "Dropping event of cancelled run");
            }
        }
    }
}

/// Trim `topic`, rejecting it if nothing is left.
pub fn validate_topic(topic: &str) -> RunResult<String> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        tracing::debug!("Rejecting empty research topic");
        return Err(RunError::Validation(EMPTY_TOPIC_MESSAGE.to_string()));
    }
    Ok(trimmed.to_string())
}
