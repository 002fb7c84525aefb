//! Multi-turn conversation.

use super::DebateEngine;
use debate_domain::FollowUpNode;
use tracing::info;

impl DebateEngine {
    /// Freeze the current turn into history. Only the first call per turn counts.
    pub fn save_current_turn(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self.turns.save(self.store.texts(), now) {
            return false;
        }
        self.publish();
        true
    }

    /// Record a follow-up question leading into the next turn.
    pub fn add_follow_up_question(&mut self, question: impl Into<String>) -> FollowUpNode {
        let node = self.turns.add_follow_up(question).clone();
        self.publish();
        node
    }

    /// Start the next turn: fresh records for the same roster, no
    /// checkpoints or constraints. History is kept.
    pub fn start_follow_up_debate(&mut self, query: impl Into<String>) {
        self.store.refresh();
        self.turns.advance(query);
        self.begin_turn();
        self.publish();
    }

    /// Save the current turn, then chain `question` as the next one.
    pub fn follow_up(&mut self, question: impl Into<String>) -> FollowUpNode {
        let question = question.into();
        self.save_current_turn();
        let node = self.turns.add_follow_up(question.clone()).clone();
        self.start_follow_up_debate(question);
        node
    }

    /// Drop every saved turn and follow-up ("new consultation").
    pub fn clear_conversation(&mut self) {
        self.turns.clear();
        info!("Conversation cleared");
        self.publish();
    }
}
