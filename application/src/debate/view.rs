//! Read-only debate view
//!
//! [`DebateView`] is what subscribers receive. Every collection is an
//! `Arc` shared with the engine, so publishing a view is cheap and a
//! subscriber can compare two views piecewise with `Arc::ptr_eq`.

use crate::debate::agent_store::AgentMap;
use debate_domain::{AgentId, AgentRecord, Checkpoint, DebateTurnSnapshot, FollowUpNode, Phase};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DebateView {
    /// Bumped on every publication.
    pub version: u64,
    pub query: String,
    pub phase: Phase,
    pub active_agents: Vec<AgentId>,
    /// Records to display: the live records, or a paused copy while time travelling.
    pub agents: Arc<AgentMap>,
    pub tokens_per_second: f64,
    pub total_tokens: u64,
    pub simulated_tokens_per_second: Option<u64>,
    pub checkpoints: Arc<Vec<Checkpoint>>,
    pub active_checkpoint_index: Option<usize>,
    pub completed_turns: Arc<Vec<DebateTurnSnapshot>>,
    pub follow_up_nodes: Arc<Vec<FollowUpNode>>,
    pub current_turn_index: usize,
    pub constraints: Arc<Vec<String>>,
    pub error: Option<String>,
}

impl DebateView {
    pub fn agent(&self, id: &AgentId) -> Option<&AgentRecord> {
        self.agents.get(id).map(Arc::as_ref)
    }

    pub fn is_time_travelling(&self) -> bool {
        self.active_checkpoint_index.is_some()
    }

    /// Throughput to show: the reported aggregate when there is one,
    /// otherwise the simulated figure.
    pub fn display_tokens_per_second(&self) -> f64 {
        if self.tokens_per_second > 0.0 {
            self.tokens_per_second
        } else {
            self.simulated_tokens_per_second.unwrap_or(0) as f64
        }
    }

    pub fn streaming_count(&self) -> usize {
        self.agents.values().filter(|r| r.is_streaming).count()
    }
}
