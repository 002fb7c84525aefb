//! Conversation entities

use crate::agent::value_objects::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frozen record of one completed query/response cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateTurnSnapshot {
    pub turn_index: usize,
    pub query: String,
    pub agent_texts: BTreeMap<AgentId, String>,
    /// Wall-clock completion time (milliseconds since epoch).
    pub completed_at_ms: u64,
}

impl DebateTurnSnapshot {
    pub fn text_of(&self, agent_id: &AgentId) -> Option<&str> {
        self.agent_texts.get(agent_id).map(String::as_str)
    }
}

/// A user-authored question inserted between two turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpNode {
    pub id: String,
    pub question: String,
    /// Index of the turn this question leads into.
    pub turn_index: usize,
}

impl FollowUpNode {
    /// `sequence` is the node's position in the conversation's follow-up list.
    pub fn new(sequence: usize, question: impl Into<String>, turn_index: usize) -> Self {
        Self {
            id: format!("follow-up-{}", sequence),
            question: question.into(),
            turn_index,
        }
    }
}
