//! Debate Engine
//!
//! [`DebateEngine`] composes the debate components behind one `&mut self`
//! API and publishes a fresh [`DebateView`] after every mutation that
//! changed something. Every mutator is synchronous: the asynchronous
//! transport lives outside and hands events to [`DebateEngine::ingest`].
//!
//! # Example
//!
//! ```
//! use debate_application::engine::DebateEngine;
//! use debate_application::EngineConfig;
//! use debate_domain::{AgentId, AgentSpec};
//!
//! let mut engine = DebateEngine::new(EngineConfig::default());
//! let view = engine.subscribe();
//! engine.start_debate("Should we expand?", vec![AgentSpec::new("cfo", "CFO", "#4f46e5")]);
//! engine.append_token(&AgentId::new("cfo"), "Margins are thin.").unwrap();
//!
//! let current = view.borrow();
//! assert_eq!(current.agent(&AgentId::new("cfo")).unwrap().text, "Margins are thin.");
//! ```

mod conversation;
mod ingest;
mod time_travel;

pub use ingest::IngestOutcome;

use crate::config::EngineConfig;
use crate::debate::{
    AgentStore, CheckpointManager, DebateView, EngineError, MetricsAggregator, PhaseController,
    TurnManager,
};
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::event_recorder::{EventRecorder, NoEventRecorder};
use crate::ports::throughput::{NoSimulation, ThroughputSimulator};
use debate_domain::{
    AgentFailure, AgentId, AgentMetrics, AgentRecord, AgentSpec, CheckpointKind, Phase,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct DebateEngine {
    config: EngineConfig,
    store: AgentStore,
    phase: PhaseController,
    metrics: MetricsAggregator,
    checkpoints: CheckpointManager,
    turns: TurnManager,
    constraints: Arc<Vec<String>>,
    error: Option<String>,
    debate_start_ms: u64,
    checkpoint_sequence: usize,
    clock: Arc<dyn Clock>,
    simulator: Box<dyn ThroughputSimulator>,
    recorder: Arc<dyn EventRecorder>,
    version: u64,
    view_tx: watch::Sender<DebateView>,
}

impl DebateEngine {
    pub fn new(config: EngineConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let (view_tx, _) = watch::channel(DebateView::default());
        Self {
            store: AgentStore::new(config.admission, config.max_agents),
            phase: PhaseController::new(config.transitions),
            metrics: MetricsAggregator::new(),
            checkpoints: CheckpointManager::new(),
            turns: TurnManager::new(),
            constraints: Arc::new(Vec::new()),
            error: None,
            debate_start_ms: clock.now_ms(),
            checkpoint_sequence: 0,
            clock,
            simulator: Box::new(NoSimulation),
            recorder: Arc::new(NoEventRecorder),
            version: 0,
            view_tx,
            config,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.debate_start_ms = clock.now_ms();
        self.clock = clock;
        self
    }

    pub fn with_simulator(mut self, simulator: Box<dyn ThroughputSimulator>) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn EventRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    // ==================== View ====================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Receive every view published from now on.
    pub fn subscribe(&self) -> watch::Receiver<DebateView> {
        self.view_tx.subscribe()
    }

    /// The last published view.
    pub fn view(&self) -> DebateView {
        self.view_tx.borrow().clone()
    }

    /// Live record of `id`, ignoring time travel.
    pub fn live_agent(&self, id: &AgentId) -> Option<&AgentRecord> {
        self.store.get(id)
    }

    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    /// Milliseconds since the current debate started.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.now_ms().saturating_sub(self.debate_start_ms)
    }

    fn publish(&mut self) {
        self.version += 1;
        let agents = self
            .checkpoints
            .paused_records()
            .cloned()
            .unwrap_or_else(|| Arc::clone(self.store.records()));
        let aggregate = *self.metrics.aggregate();

        let view = DebateView {
            version: self.version,
            query: self.turns.query().to_string(),
            phase: self.phase.phase(),
            active_agents: self.phase.active_agents().to_vec(),
            agents,
            tokens_per_second: aggregate.tokens_per_second,
            total_tokens: aggregate.total_tokens,
            simulated_tokens_per_second: self.metrics.simulated(),
            checkpoints: Arc::clone(self.checkpoints.checkpoints()),
            active_checkpoint_index: self.checkpoints.active_index(),
            completed_turns: Arc::clone(self.turns.completed()),
            follow_up_nodes: Arc::clone(self.turns.follow_ups()),
            current_turn_index: self.turns.current_turn_index(),
            constraints: Arc::clone(&self.constraints),
            error: self.error.clone(),
        };
        self.view_tx.send_replace(view);
    }

    // ==================== Lifecycle ====================

    /// Begin a debate on `query` with a fresh record per roster entry.
    pub fn start_debate(&mut self, query: impl Into<String>, roster: Vec<AgentSpec>) {
        self.store.reset(roster);
        self.turns.begin(query);
        self.begin_turn();
        info!(
            "Debate started with {} agents: {:?}",
            self.store.len(),
            self.turns.query()
        );
        self.publish();
    }

    /// Abandon the current turn. Turn history is kept.
    pub fn reset_debate(&mut self) {
        self.store.refresh();
        self.begin_turn();
        info!("Debate reset");
        self.publish();
    }

    /// Per-turn state shared by every way a turn starts.
    fn begin_turn(&mut self) {
        self.phase.reset();
        self.metrics.reset();
        self.checkpoints.clear();
        self.constraints = Arc::new(Vec::new());
        self.error = None;
        self.checkpoint_sequence = 0;
        self.debate_start_ms = self.clock.now_ms();
    }

    /// Set or clear (`None`) the global error banner.
    pub fn set_error(&mut self, error: Option<String>) {
        if self.error == error {
            return;
        }
        if let Some(message) = &error {
            warn!("Debate error: {}", message);
        }
        self.error = error;
        self.publish();
    }

    /// Hard stop: phase `complete` and every stream halted.
    pub fn end_debate(&mut self) {
        self.phase.force_complete();
        self.store.halt_all();
        info!("Debate ended after {}ms", self.elapsed_ms());
        self.publish();
    }

    // ==================== Phase ====================

    /// Move to `phase` with `agents` active. Unlisted agents are untouched.
    pub fn set_phase(&mut self, phase: Phase, agents: &[AgentId]) -> Result<(), EngineError> {
        self.phase.check(phase)?;
        self.store.enter_phase(agents, phase)?;
        let changed = self.phase.transition(phase, agents)?;

        if changed && self.config.auto_checkpoint.on_phase_start {
            self.capture(
                CheckpointKind::RoundStarted,
                format!("{} started", phase.display_name()),
                None,
                Some(phase.as_str().to_string()),
            );
        }
        self.publish();
        Ok(())
    }

    // ==================== Agent Records ====================

    pub fn append_token(&mut self, id: &AgentId, chunk: &str) -> Result<(), EngineError> {
        let now = self.clock.now_ms();
        self.store.append_token(id, chunk, now)?;
        self.publish();
        Ok(())
    }

    /// Stop `id`'s stream. Returns `false` if nothing changed.
    pub fn set_agent_done(&mut self, id: &AgentId) -> bool {
        if !self.store.set_done(id) {
            debug!("Agent {} already idle", id);
            return false;
        }
        if self.config.auto_checkpoint.on_agent_done {
            let label = self
                .store
                .get(id)
                .map(|r| format!("{} done", r.display_name))
                .unwrap_or_else(|| format!("{} done", id));
            self.capture(CheckpointKind::AgentCompleted, label, Some(id.clone()), None);
        }
        self.publish();
        true
    }

    /// Mark `id` failed. Its partial text stays visible.
    pub fn set_agent_error(&mut self, id: &AgentId, message: &str) -> Result<(), EngineError> {
        let failure = AgentFailure::new(message);
        warn!("Agent {} failed: {}", id, failure);
        self.store.set_error(id, failure)?;
        self.publish();
        Ok(())
    }

    /// Apply reported usage and recompute the aggregate.
    pub fn set_agent_metrics(
        &mut self,
        id: &AgentId,
        metrics: &AgentMetrics,
    ) -> Result<(), EngineError> {
        self.store.set_metrics(id, metrics)?;
        self.metrics.recompute(self.store.records());
        if self.metrics.aggregate().is_reported() {
            self.metrics.set_simulated(None);
        }
        self.publish();
        Ok(())
    }

    // ==================== User actions ====================

    /// Record a user constraint and checkpoint it.
    pub fn inject_constraint(&mut self, constraint: impl Into<String>) -> String {
        let constraint = constraint.into();
        info!("Constraint injected: {:?}", constraint);
        Arc::make_mut(&mut self.constraints).push(constraint.clone());
        let id = self.capture(CheckpointKind::UserConstraint, constraint, None, None);
        self.publish();
        id
    }

    // ==================== Simulated throughput ====================

    /// Sample the simulator while agents stream without reported usage.
    pub fn tick_simulated_throughput(&mut self) -> Option<u64> {
        let value = if self.store.any_streaming() && !self.metrics.aggregate().is_reported() {
            self.simulator.sample()
        } else {
            None
        };
        if self.metrics.set_simulated(value) {
            self.publish();
        }
        value
    }
}
