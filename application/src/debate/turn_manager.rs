//! Turn Manager
//!
//! Conversation continuity across turns: the active query, frozen
//! [`DebateTurnSnapshot`]s of finished turns, and the follow-up questions
//! chained between them. History lives behind `Arc`s so a published view
//! shares it until the next append.

use debate_domain::{AgentId, DebateTurnSnapshot, FollowUpNode};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct TurnManager {
    query: String,
    current_turn_index: usize,
    /// Whether the current turn already has a snapshot.
    saved: bool,
    completed: Arc<Vec<DebateTurnSnapshot>>,
    follow_ups: Arc<Vec<FollowUpNode>>,
    follow_up_sequence: usize,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_turn_index(&self) -> usize {
        self.current_turn_index
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn completed(&self) -> &Arc<Vec<DebateTurnSnapshot>> {
        &self.completed
    }

    pub fn follow_ups(&self) -> &Arc<Vec<FollowUpNode>> {
        &self.follow_ups
    }

    /// Set the query of the current turn.
    pub fn begin(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.saved = false;
    }

    /// Freeze the current turn. Returns `false` if it was already saved.
    pub fn save(&mut self, agent_texts: BTreeMap<AgentId, String>, now_ms: u64) -> bool {
        if self.saved {
            debug!("Turn {} already saved", self.current_turn_index);
            return false;
        }
        Arc::make_mut(&mut self.completed).push(DebateTurnSnapshot {
            turn_index: self.current_turn_index,
            query: self.query.clone(),
            agent_texts,
            completed_at_ms: now_ms,
        });
        self.saved = true;
        info!("Turn {} saved", self.current_turn_index);
        true
    }

    /// Record a follow-up question leading into the next turn.
    pub fn add_follow_up(&mut self, question: impl Into<String>) -> &FollowUpNode {
        self.follow_up_sequence += 1;
        let node = FollowUpNode::new(
            self.follow_up_sequence,
            question,
            self.current_turn_index + 1,
        );
        let follow_ups = Arc::make_mut(&mut self.follow_ups);
        follow_ups.push(node);
        &follow_ups[follow_ups.len() - 1]
    }

    /// Move to the next turn with `query`.
    pub fn advance(&mut self, query: impl Into<String>) {
        self.current_turn_index += 1;
        self.begin(query);
        info!("Turn {} started", self.current_turn_index);
    }

    /// Drop every saved turn and follow-up and return to turn 0.
    pub fn clear(&mut self) {
        let query = std::mem::take(&mut self.query);
        *self = Self::default();
        self.query = query;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(a: &str) -> BTreeMap<AgentId, String> {
        [(AgentId::new("A"), a.to_string())].into_iter().collect()
    }

    #[test]
    fn test_save_is_once_per_turn() {
        let mut turns = TurnManager::new();
        turns.begin("Q1");
        assert!(turns.save(texts("first"), 100));
        assert!(!turns.save(texts("second"), 200));
        assert_eq!(turns.completed().len(), 1);
        assert_eq!(turns.completed()[0].query, "Q1");
        assert_eq!(turns.completed()[0].text_of(&"A".into()), Some("first"));
    }

    #[test]
    fn test_follow_up_targets_next_turn() {
        let mut turns = TurnManager::new();
        turns.begin("Q1");
        let node = turns.add_follow_up("Why?");
        assert_eq!(node.turn_index, 1);
        assert_eq!(node.id, "follow-up-1");
    }

    #[test]
    fn test_advance_preserves_history() {
        let mut turns = TurnManager::new();
        turns.begin("Q1");
        turns.save(texts("done"), 100);
        turns.add_follow_up("Q2");
        turns.advance("Q2");

        assert_eq!(turns.current_turn_index(), 1);
        assert_eq!(turns.query(), "Q2");
        assert!(!turns.is_saved());
        assert_eq!(turns.completed().len(), 1);
        assert_eq!(turns.follow_ups().len(), 1);
        assert!(turns.save(texts("again"), 200));
        assert_eq!(turns.completed()[1].turn_index, 1);
    }

    #[test]
    fn test_clear_drops_history() {
        let mut turns = TurnManager::new();
        turns.begin("Q1");
        turns.save(texts("done"), 100);
        turns.add_follow_up("Q2");
        turns.advance("Q2");
        turns.clear();

        assert!(turns.completed().is_empty());
        assert!(turns.follow_ups().is_empty());
        assert_eq!(turns.current_turn_index(), 0);
        assert_eq!(turns.query(), "Q2");
        assert_eq!(turns.add_follow_up("next").id, "follow-up-1");
    }
}
