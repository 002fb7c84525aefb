//! Agent Record Store
//!
//! Holds the live [`AgentRecord`] of every participant. Storage is
//! copy-on-write: the map and each record sit behind an `Arc`, and a
//! mutation replaces only the `Arc`s on the path it touches. A subscriber
//! holding an older map can tell what changed with `Arc::ptr_eq`, and
//! records that did not change keep their identity.

use crate::config::AdmissionPolicy;
use crate::debate::error::EngineError;
use debate_domain::{AgentFailure, AgentId, AgentMetrics, AgentRecord, AgentSpec, Checkpoint, Phase};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Agent records keyed by id.
pub type AgentMap = BTreeMap<AgentId, Arc<AgentRecord>>;

pub struct AgentStore {
    records: Arc<AgentMap>,
    /// Authoritative registry of participants, in join order.
    roster: Vec<AgentSpec>,
    admission: AdmissionPolicy,
    max_agents: usize,
}

impl AgentStore {
    pub fn new(admission: AdmissionPolicy, max_agents: usize) -> Self {
        Self {
            records: Arc::new(AgentMap::new()),
            roster: Vec::new(),
            admission,
            max_agents,
        }
    }

    /// Replace every record with a fresh one built from `roster`.
    ///
    /// Duplicate ids keep their first entry.
    pub fn reset(&mut self, roster: Vec<AgentSpec>) {
        self.roster.clear();
        for spec in roster {
            if !self.roster.iter().any(|s| s.id == spec.id) {
                self.roster.push(spec);
            }
        }
        self.rebuild();
    }

    /// Fresh, empty records for the current roster (start of a new turn).
    pub fn refresh(&mut self) {
        self.rebuild();
    }

    /// Drop every record and the roster.
    pub fn clear(&mut self) {
        self.roster.clear();
        self.records = Arc::new(AgentMap::new());
    }

    fn rebuild(&mut self) {
        let records = self
            .roster
            .iter()
            .map(|spec| (spec.id.clone(), Arc::new(AgentRecord::new(spec))))
            .collect();
        self.records = Arc::new(records);
    }

    // ==================== Read access ====================

    pub fn records(&self) -> &Arc<AgentMap> {
        &self.records
    }

    pub fn get(&self, id: &AgentId) -> Option<&AgentRecord> {
        self.records.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn roster(&self) -> &[AgentSpec] {
        &self.roster
    }

    /// Owned copy of every agent's current text.
    pub fn texts(&self) -> BTreeMap<AgentId, String> {
        self.records
            .iter()
            .map(|(id, record)| (id.clone(), record.text.clone()))
            .collect()
    }

    pub fn any_streaming(&self) -> bool {
        self.records.values().any(|r| r.is_streaming)
    }

    // ==================== Registry ====================

    fn record_mut(&mut self, id: &AgentId) -> Option<&mut AgentRecord> {
        Arc::make_mut(&mut self.records)
            .get_mut(id)
            .map(Arc::make_mut)
    }

    /// Make sure `id` has a record, creating it when the admission policy allows.
    fn admit(&mut self, id: &AgentId) -> Result<(), EngineError> {
        if self.contains(id) {
            return Ok(());
        }
        id.validate()?;

        match self.admission {
            AdmissionPolicy::Strict => Err(EngineError::UnknownAgent(id.clone())),
            AdmissionPolicy::Dynamic => {
                if self.records.len() >= self.max_agents {
                    return Err(EngineError::RosterFull {
                        id: id.clone(),
                        max: self.max_agents,
                    });
                }
                let spec = AgentSpec::derived(id.clone(), self.roster.len());
                debug!("Admitting agent {} as {:?}", id, spec.display_name);
                Arc::make_mut(&mut self.records)
                    .insert(id.clone(), Arc::new(AgentRecord::new(&spec)));
                self.roster.push(spec);
                Ok(())
            }
        }
    }

    // ==================== Mutators ====================

    /// Append a chunk to the agent's text, admitting the agent if needed.
    pub fn append_token(
        &mut self,
        id: &AgentId,
        chunk: &str,
        now_ms: u64,
    ) -> Result<(), EngineError> {
        self.admit(id)?;
        if let Some(record) = self.record_mut(id) {
            record.append(chunk, now_ms);
        }
        Ok(())
    }

    /// Stop the agent's stream. Returns `false` for unknown or already idle agents.
    pub fn set_done(&mut self, id: &AgentId) -> bool {
        match self.records.get(id) {
            Some(record) if record.is_streaming || record.stream_start_ms.is_some() => {}
            _ => return false,
        }
        self.record_mut(id)
            .map(AgentRecord::finish_stream)
            .unwrap_or(false)
    }

    /// Mark the agent failed, keeping its partial text.
    pub fn set_error(&mut self, id: &AgentId, failure: AgentFailure) -> Result<(), EngineError> {
        self.admit(id)?;
        if let Some(record) = self.record_mut(id) {
            record.fail(failure);
        }
        Ok(())
    }

    /// Apply backend-reported usage to the agent.
    pub fn set_metrics(&mut self, id: &AgentId, metrics: &AgentMetrics) -> Result<(), EngineError> {
        metrics
            .validate()
            .map_err(|e| EngineError::InvalidMetrics {
                agent_id: id.clone(),
                reason: e.to_string(),
            })?;
        self.admit(id)?;
        if let Some(record) = self.record_mut(id) {
            record.apply_metrics(metrics);
        }
        Ok(())
    }

    /// Assign `ids` to `phase`. Either every id is admitted or nothing changes.
    pub fn enter_phase(&mut self, ids: &[AgentId], phase: Phase) -> Result<(), EngineError> {
        let mut unknown: Vec<&AgentId> = Vec::new();
        for id in ids {
            if !self.contains(id) && !unknown.contains(&id) {
                id.validate()?;
                unknown.push(id);
            }
        }

        if let Some(first) = unknown.first() {
            match self.admission {
                AdmissionPolicy::Strict => {
                    return Err(EngineError::UnknownAgent((*first).clone()));
                }
                AdmissionPolicy::Dynamic => {
                    if self.records.len() + unknown.len() > self.max_agents {
                        let overflow = self.max_agents.saturating_sub(self.records.len());
                        let rejected = unknown.get(overflow).copied().unwrap_or(*first);
                        return Err(EngineError::RosterFull {
                            id: rejected.clone(),
                            max: self.max_agents,
                        });
                    }
                }
            }
        }

        for id in ids {
            self.admit(id)?;
            if let Some(record) = self.record_mut(id) {
                record.enter_phase(phase);
            }
        }
        Ok(())
    }

    /// Stop every stream. Returns whether any record changed.
    pub fn halt_all(&mut self) -> bool {
        let streaming: Vec<AgentId> = self
            .records
            .iter()
            .filter(|(_, r)| r.is_streaming || r.stream_start_ms.is_some())
            .map(|(id, _)| id.clone())
            .collect();

        for id in &streaming {
            if let Some(record) = self.record_mut(id) {
                record.finish_stream();
            }
        }
        !streaming.is_empty()
    }

    /// Replace every known agent's text with `texts` (absent agents become empty).
    pub fn restore_texts(&mut self, texts: &BTreeMap<AgentId, String>) {
        let changed: Vec<AgentId> = self
            .records
            .iter()
            .filter(|(id, r)| r.text != texts.get(*id).map(String::as_str).unwrap_or_default())
            .map(|(id, _)| id.clone())
            .collect();

        for id in changed {
            let text = texts.get(&id).cloned().unwrap_or_default();
            if let Some(record) = self.record_mut(&id) {
                record.restore_text(&text);
            }
        }
    }

    /// The records as they looked in `checkpoint`, all paused.
    pub fn paused_at(&self, checkpoint: &Checkpoint) -> Arc<AgentMap> {
        let records = self
            .records
            .iter()
            .map(|(id, record)| {
                (
                    id.clone(),
                    Arc::new(record.paused_at(checkpoint.text_of(id))),
                )
            })
            .collect();
        Arc::new(records)
    }
}
