//! Event Ingestion Facade
//!
//! The single entry point a transport calls for each inbound event. A
//! failing event never stops ingestion: the error is routed to the
//! originating agent when it has a record, to the global banner otherwise,
//! and reported back as [`IngestOutcome::Rejected`].

use super::DebateEngine;
use crate::debate::EngineError;
use debate_domain::{AgentFailure, DebateEvent};
use tracing::{debug, warn};

/// What ingesting one event did.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// State changed.
    Applied,
    /// Valid but redundant (e.g. `agent_done` for an idle agent).
    Ignored,
    /// The event failed; the error has been surfaced in the view.
    Rejected(EngineError),
}

impl IngestOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, IngestOutcome::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, IngestOutcome::Rejected(_))
    }
}

impl DebateEngine {
    /// Apply one inbound event.
    pub fn ingest(&mut self, event: DebateEvent) -> IngestOutcome {
        self.recorder.record(&event);
        debug!(kind = event.kind(), agent = ?event.agent_id(), "Ingesting event");

        let checkpoint = event.checkpoint_meta();
        let result = match event {
            DebateEvent::Token { agent_id, text } => {
                self.append_token(&agent_id, &text).map(|_| true)
            }
            DebateEvent::Metrics { agent_id, metrics } => {
                self.set_agent_metrics(&agent_id, &metrics).map(|_| true)
            }
            DebateEvent::Phase { phase, agents } => self.set_phase(phase, &agents).map(|_| true),
            DebateEvent::AgentDone { agent_id } => Ok(self.set_agent_done(&agent_id)),
            DebateEvent::AgentError { agent_id, message } => {
                self.set_agent_error(&agent_id, &message).map(|_| true)
            }
            DebateEvent::Checkpoint { .. } => {
                if let Some(meta) = checkpoint {
                    self.add_checkpoint(meta);
                }
                Ok(true)
            }
            DebateEvent::DebateEnd => {
                self.end_debate();
                Ok(true)
            }
        };

        match result {
            Ok(true) => IngestOutcome::Applied,
            Ok(false) => IngestOutcome::Ignored,
            Err(error) => {
                self.route_error(&error);
                IngestOutcome::Rejected(error)
            }
        }
    }

    /// Surface a rejected event on its agent, or on the global banner.
    fn route_error(&mut self, error: &EngineError) {
        warn!("Rejected event: {}", error);
        match error.agent_id() {
            Some(id) if self.store.contains(id) => {
                if self
                    .store
                    .set_error(id, AgentFailure::new(error.to_string()))
                    .is_ok()
                {
                    self.publish();
                }
            }
            _ => self.set_error(Some(error.to_string())),
        }
    }
}
