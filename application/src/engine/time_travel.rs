//! Checkpoints and time travel.

use super::DebateEngine;
use debate_domain::{AgentId, CheckpointKind, CheckpointMeta};
use tracing::info;

impl DebateEngine {
    /// Snapshot every live agent text under `meta`.
    pub fn add_checkpoint(&mut self, meta: CheckpointMeta) {
        self.checkpoints.add(meta, self.store.texts());
        self.publish();
    }

    /// Checkpoint stamped by the engine. Returns the generated id.
    pub fn checkpoint_now(
        &mut self,
        kind: CheckpointKind,
        label: impl Into<String>,
        agent_id: Option<AgentId>,
        round_name: Option<String>,
    ) -> String {
        let id = self.capture(kind, label.into(), agent_id, round_name);
        self.publish();
        id
    }

    /// Add an engine-stamped checkpoint without publishing.
    pub(super) fn capture(
        &mut self,
        kind: CheckpointKind,
        label: String,
        agent_id: Option<AgentId>,
        round_name: Option<String>,
    ) -> String {
        self.checkpoint_sequence += 1;
        let id = format!(
            "cp-{}-{}",
            self.turns.current_turn_index(),
            self.checkpoint_sequence
        );

        let mut meta = CheckpointMeta::new(id.clone(), self.elapsed_ms(), kind, label);
        meta.agent_id = agent_id;
        meta.round_name = round_name;
        self.checkpoints.add(meta, self.store.texts());
        id
    }

    /// Show checkpoint `index` instead of the live records.
    ///
    /// Out-of-range indices are ignored. Ingestion keeps updating the live
    /// records in the meantime.
    pub fn jump_to_checkpoint(&mut self, index: usize) -> bool {
        if !self.checkpoints.jump(index, &self.store) {
            return false;
        }
        info!("Time travel to checkpoint {}", index);
        self.publish();
        true
    }

    /// Return to live mode, restoring according to the configured resume mode.
    pub fn exit_time_travel(&mut self) -> bool {
        if !self
            .checkpoints
            .exit(&mut self.store, self.config.resume)
        {
            return false;
        }
        info!("Time travel exited ({:?})", self.config.resume);
        self.publish();
        true
    }

    /// Drop every checkpoint and leave time travel.
    pub fn clear_checkpoints(&mut self) {
        self.checkpoints.clear();
        self.publish();
    }
}
