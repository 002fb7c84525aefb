//! Checkpoint Manager
//!
//! Captures snapshots of every agent's text and drives time travel. While a
//! checkpoint is being viewed, the live store keeps ingesting; what is
//! shown is a paused copy of the records built at jump time. Leaving time
//! travel either restores the last checkpoint into the live store
//! ([`ResumeMode::LastCheckpoint`]) or just drops the paused copy
//! ([`ResumeMode::LiveEdge`]).

use crate::config::ResumeMode;
use crate::debate::agent_store::{AgentMap, AgentStore};
use debate_domain::{AgentId, Checkpoint, CheckpointMeta};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct CheckpointManager {
    checkpoints: Arc<Vec<Checkpoint>>,
    active_index: Option<usize>,
    paused: Option<Arc<AgentMap>>,
}

impl CheckpointManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checkpoints(&self) -> &Arc<Vec<Checkpoint>> {
        &self.checkpoints
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn last(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_time_travelling(&self) -> bool {
        self.active_index.is_some()
    }

    /// Records to display while time travelling.
    pub fn paused_records(&self) -> Option<&Arc<AgentMap>> {
        self.paused.as_ref()
    }

    /// Append a checkpoint holding `agent_texts`.
    ///
    /// A timestamp older than the previous checkpoint's is raised to it so
    /// the list stays ordered.
    pub fn add(
        &mut self,
        mut meta: CheckpointMeta,
        agent_texts: BTreeMap<AgentId, String>,
    ) -> &Checkpoint {
        if let Some(previous) = self.checkpoints.last() {
            if meta.timestamp_ms < previous.timestamp_ms {
                warn!(
                    "Checkpoint {} stamped {}ms precedes {} at {}ms; clamping",
                    meta.id, meta.timestamp_ms, previous.id, previous.timestamp_ms
                );
                meta.timestamp_ms = previous.timestamp_ms;
            }
        }

        let checkpoint = Checkpoint::capture(meta, agent_texts);
        if let Some(previous) = self.checkpoints.last() {
            if !checkpoint.extends(previous) {
                warn!(
                    "Checkpoint {} does not extend {}: some agent text shrank",
                    checkpoint.id, previous.id
                );
            }
        }

        debug!("Checkpoint {} ({}) captured", checkpoint.id, checkpoint.kind);
        let checkpoints = Arc::make_mut(&mut self.checkpoints);
        checkpoints.push(checkpoint);
        &checkpoints[checkpoints.len() - 1]
    }

    /// View checkpoint `index`. Out-of-range indices are ignored.
    pub fn jump(&mut self, index: usize, store: &AgentStore) -> bool {
        let Some(checkpoint) = self.checkpoints.get(index) else {
            debug!(
                "Ignoring jump to checkpoint {} ({} available)",
                index,
                self.checkpoints.len()
            );
            return false;
        };
        self.paused = Some(store.paused_at(checkpoint));
        self.active_index = Some(index);
        true
    }

    /// Leave time travel. Returns `false` when not time travelling.
    pub fn exit(&mut self, store: &mut AgentStore, resume: ResumeMode) -> bool {
        if !self.is_time_travelling() {
            return false;
        }
        if resume == ResumeMode::LastCheckpoint {
            if let Some(last) = self.checkpoints.last() {
                for (id, bytes) in discarded_bytes(store, &last.agent_texts) {
                    warn!(
                        "Resuming {} from checkpoint {} discards {} bytes of live output",
                        id, last.id, bytes
                    );
                }
                store.restore_texts(&last.agent_texts);
            }
        }
        self.leave();
        true
    }

    /// Drop the paused view without restoring anything.
    pub fn leave(&mut self) {
        self.active_index = None;
        self.paused = None;
    }

    /// Empty the list and leave time travel.
    pub fn clear(&mut self) {
        self.checkpoints = Arc::new(Vec::new());
        self.leave();
    }
}

/// Live output per agent that restoring `texts` would throw away.
fn discarded_bytes(
    store: &AgentStore,
    texts: &BTreeMap<AgentId, String>,
) -> Vec<(AgentId, usize)> {
    store
        .records()
        .iter()
        .filter_map(|(id, record)| {
            let kept = texts.get(id).map(String::len).unwrap_or_default();
            let lost = record.text.len().saturating_sub(kept);
            (lost > 0).then(|| (id.clone(), lost))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdmissionPolicy;
    use debate_domain::{AgentSpec, CheckpointKind};

    fn meta(id: &str, timestamp_ms: u64) -> CheckpointMeta {
        CheckpointMeta::new(id, timestamp_ms, CheckpointKind::AgentCompleted, id)
    }

    fn store() -> AgentStore {
        let mut store = AgentStore::new(AdmissionPolicy::Dynamic, 8);
        store.reset(vec![AgentSpec::new("A", "A", "#000")]);
        store
    }

    #[test]
    fn test_add_appends_owned_snapshot() {
        let mut manager = CheckpointManager::new();
        let mut store = store();
        store.append_token(&"A".into(), "foo", 0).unwrap();

        manager.add(meta("c1", 10), store.texts());
        store.append_token(&"A".into(), "bar", 1).unwrap();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.checkpoints()[0].text_of(&"A".into()), "foo");
    }

    #[test]
    fn test_add_clamps_out_of_order_timestamps() {
        let mut manager = CheckpointManager::new();
        manager.add(meta("c1", 500), BTreeMap::new());
        let added = manager.add(meta("c2", 200), BTreeMap::new());
        assert_eq!(added.timestamp_ms, 500);
    }

    #[test]
    fn test_jump_out_of_range_is_noop() {
        let mut manager = CheckpointManager::new();
        assert!(!manager.jump(0, &store()));
        assert_eq!(manager.active_index(), None);
        assert!(manager.paused_records().is_none());
    }

    #[test]
    fn test_exit_restores_last_checkpoint() {
        let mut manager = CheckpointManager::new();
        let mut store = store();
        store.append_token(&"A".into(), "one", 0).unwrap();
        manager.add(meta("c1", 1), store.texts());
        store.append_token(&"A".into(), " two", 1).unwrap();
        manager.add(meta("c2", 2), store.texts());
        store.append_token(&"A".into(), " three", 2).unwrap();

        assert!(manager.jump(0, &store));
        assert!(manager.exit(&mut store, ResumeMode::LastCheckpoint));
        assert_eq!(store.get(&"A".into()).unwrap().text, "one two");
        assert!(!manager.is_time_travelling());
    }

    #[test]
    fn test_discarded_bytes_counts_output_past_checkpoint() {
        let mut store = store();
        store.append_token(&"A".into(), "one", 0).unwrap();
        let texts = store.texts();
        assert!(discarded_bytes(&store, &texts).is_empty());

        store.append_token(&"A".into(), " three", 1).unwrap();
        assert_eq!(discarded_bytes(&store, &texts), vec![(AgentId::new("A"), 6)]);
        assert_eq!(
            discarded_bytes(&store, &BTreeMap::new()),
            vec![(AgentId::new("A"), 9)]
        );
    }

    #[test]
    fn test_exit_live_edge_keeps_live_text() {
        let mut manager = CheckpointManager::new();
        let mut store = store();
        store.append_token(&"A".into(), "one", 0).unwrap();
        manager.add(meta("c1", 1), store.texts());
        assert!(manager.jump(0, &store));
        store.append_token(&"A".into(), " more", 1).unwrap();
        assert!(manager.exit(&mut store, ResumeMode::LiveEdge));
        assert_eq!(store.get(&"A".into()).unwrap().text, "one more");
    }

    #[test]
    fn test_exit_when_live_is_noop() {
        let mut manager = CheckpointManager::new();
        let mut store = store();
        manager.add(meta("c1", 1), store.texts());
        store.append_token(&"A".into(), "after", 1).unwrap();
        assert!(!manager.exit(&mut store, ResumeMode::LastCheckpoint));
        assert_eq!(store.get(&"A".into()).unwrap().text, "after");
    }

    #[test]
    fn test_clear_leaves_time_travel() {
        let mut manager = CheckpointManager::new();
        let store = store();
        manager.add(meta("c1", 1), store.texts());
        manager.jump(0, &store);
        manager.clear();
        assert!(manager.is_empty());
        assert!(!manager.is_time_travelling());
    }
}
