//! Checkpoint entities

use crate::agent::value_objects::AgentId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What caused a checkpoint to be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointKind {
    #[serde(alias = "agent-completed", alias = "agent_done")]
    AgentCompleted,
    #[serde(alias = "round-started")]
    RoundStarted,
    #[serde(alias = "user-constraint")]
    UserConstraint,
}

impl CheckpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointKind::AgentCompleted => "agent_completed",
            CheckpointKind::RoundStarted => "round_started",
            CheckpointKind::UserConstraint => "user_constraint",
        }
    }
}

impl std::str::FromStr for CheckpointKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "agent_completed" | "agent_done" => Ok(CheckpointKind::AgentCompleted),
            "round_started" => Ok(CheckpointKind::RoundStarted),
            "user_constraint" => Ok(CheckpointKind::UserConstraint),
            _ => Err(DomainError::UnknownCheckpointKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for CheckpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive part of a checkpoint, as announced by the transport or the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointMeta {
    pub id: String,
    /// Milliseconds since the debate started.
    pub timestamp_ms: u64,
    pub kind: CheckpointKind,
    pub label: String,
    pub agent_id: Option<AgentId>,
    pub round_name: Option<String>,
}

impl CheckpointMeta {
    pub fn new(
        id: impl Into<String>,
        timestamp_ms: u64,
        kind: CheckpointKind,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp_ms,
            kind,
            label: label.into(),
            agent_id: None,
            round_name: None,
        }
    }

    pub fn with_agent(mut self, agent_id: impl Into<AgentId>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_round(mut self, round_name: impl Into<String>) -> Self {
        self.round_name = Some(round_name.into());
        self
    }
}

/// Immutable snapshot of every agent's text at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub timestamp_ms: u64,
    pub kind: CheckpointKind,
    pub label: String,
    pub agent_id: Option<AgentId>,
    pub round_name: Option<String>,
    pub agent_texts: BTreeMap<AgentId, String>,
}

impl Checkpoint {
    /// Build a checkpoint from its metadata and an owned copy of the texts.
    pub fn capture(meta: CheckpointMeta, agent_texts: BTreeMap<AgentId, String>) -> Self {
        Self {
            id: meta.id,
            timestamp_ms: meta.timestamp_ms,
            kind: meta.kind,
            label: meta.label,
            agent_id: meta.agent_id,
            round_name: meta.round_name,
            agent_texts,
        }
    }

    /// Text of `agent_id` at this checkpoint; agents unknown at capture time read as empty.
    pub fn text_of(&self, agent_id: &AgentId) -> &str {
        self.agent_texts
            .get(agent_id)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether this checkpoint could have been taken after `earlier` in the
    /// same turn: not earlier in time, and every agent's text extends the
    /// text it had in `earlier`.
    pub fn extends(&self, earlier: &Checkpoint) -> bool {
        self.timestamp_ms >= earlier.timestamp_ms
            && earlier
                .agent_texts
                .iter()
                .all(|(id, text)| self.text_of(id).starts_with(text.as_str()))
    }
}
