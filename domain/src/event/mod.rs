//! Inbound debate events.
//!
//! [`DebateEvent`] is the contract between a transport and the engine. A
//! transport (websocket, SSE, a recorded JSONL file) decodes its wire format
//! into these variants and hands them over one at a time, per-agent order
//! preserved.
//!
//! On the wire every event is a JSON object tagged by `type`:
//!
//! ```
//! use debate_domain::DebateEvent;
//!
//! let event: DebateEvent =
//!     serde_json::from_str(r#"{"type":"token","agent_id":"cfo","text":"Margins"}"#).unwrap();
//! assert_eq!(event.kind(), "token");
//! ```

use crate::agent::value_objects::{AgentId, AgentMetrics};
use crate::checkpoint::entities::{CheckpointKind, CheckpointMeta};
use crate::orchestration::entities::Phase;
use serde::{Deserialize, Serialize};

/// An event delivered by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebateEvent {
    /// A text chunk streamed by one agent.
    Token {
        #[serde(alias = "agentId")]
        agent_id: AgentId,
        text: String,
    },
    /// Authoritative usage figures for one agent.
    Metrics {
        #[serde(alias = "agentId")]
        agent_id: AgentId,
        metrics: AgentMetrics,
    },
    /// The debate moved to `phase`; `agents` are expected to stream in it.
    Phase {
        phase: Phase,
        #[serde(default)]
        agents: Vec<AgentId>,
    },
    /// One agent finished its stream.
    AgentDone {
        #[serde(alias = "agentId")]
        agent_id: AgentId,
    },
    /// One agent failed; its partial output stays.
    AgentError {
        #[serde(alias = "agentId")]
        agent_id: AgentId,
        message: String,
    },
    /// A checkpoint announced by the backend.
    Checkpoint {
        id: String,
        /// Milliseconds since the debate started.
        timestamp: u64,
        #[serde(rename = "checkpoint_type", alias = "checkpointType")]
        kind: CheckpointKind,
        label: String,
        #[serde(default, alias = "agentId", skip_serializing_if = "Option::is_none")]
        agent_id: Option<AgentId>,
        #[serde(default, alias = "roundName", skip_serializing_if = "Option::is_none")]
        round_name: Option<String>,
    },
    /// Hard stop: the debate is over regardless of per-agent state.
    DebateEnd,
}

impl DebateEvent {
    /// Wire name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DebateEvent::Token { .. } => "token",
            DebateEvent::Metrics { .. } => "metrics",
            DebateEvent::Phase { .. } => "phase",
            DebateEvent::AgentDone { .. } => "agent_done",
            DebateEvent::AgentError { .. } => "agent_error",
            DebateEvent::Checkpoint { .. } => "checkpoint",
            DebateEvent::DebateEnd => "debate_end",
        }
    }

    /// The agent this event originates from, if any.
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            DebateEvent::Token { agent_id, .. }
            | DebateEvent::Metrics { agent_id, .. }
            | DebateEvent::AgentDone { agent_id }
            | DebateEvent::AgentError { agent_id, .. } => Some(agent_id),
            DebateEvent::Checkpoint { agent_id, .. } => agent_id.as_ref(),
            DebateEvent::Phase { .. } | DebateEvent::DebateEnd => None,
        }
    }

    /// Returns true if this event ends the debate.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateEvent::DebateEnd)
    }

    /// Checkpoint metadata carried by a `checkpoint` event.
    pub fn checkpoint_meta(&self) -> Option<CheckpointMeta> {
        match self {
            DebateEvent::Checkpoint {
                id,
                timestamp,
                kind,
                label,
                agent_id,
                round_name,
            } => Some(CheckpointMeta {
                id: id.clone(),
                timestamp_ms: *timestamp,
                kind: *kind,
                label: label.clone(),
                agent_id: agent_id.clone(),
                round_name: round_name.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_event_decodes() {
        let event: DebateEvent =
            serde_json::from_str(r#"{"type":"token","agentId":"A","text":"foo"}"#).unwrap();
        assert_eq!(
            event,
            DebateEvent::Token {
                agent_id: AgentId::new("A"),
                text: "foo".to_string()
            }
        );
        assert_eq!(event.agent_id(), Some(&AgentId::new("A")));
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_phase_event_defaults_agent_list() {
        let event: DebateEvent =
            serde_json::from_str(r#"{"type":"phase","phase":"synthesis"}"#).unwrap();
        assert_eq!(
            event,
            DebateEvent::Phase {
                phase: Phase::Synthesis,
                agents: vec![]
            }
        );
        assert_eq!(event.agent_id(), None);
    }

    #[test]
    fn test_checkpoint_event_meta() {
        let event: DebateEvent = serde_json::from_str(
            r#"{"type":"checkpoint","id":"c1","timestamp":500,
                "checkpoint_type":"agent_done","label":"A done","agent_id":"A"}"#,
        )
        .unwrap();
        let meta = event.checkpoint_meta().unwrap();
        assert_eq!(meta.id, "c1");
        assert_eq!(meta.timestamp_ms, 500);
        assert_eq!(meta.kind, CheckpointKind::AgentCompleted);
        assert_eq!(meta.agent_id, Some(AgentId::new("A")));
        assert_eq!(meta.round_name, None);
    }

    #[test]
    fn test_debate_end_is_terminal() {
        let event: DebateEvent = serde_json::from_str(r#"{"type":"debate_end"}"#).unwrap();
        assert!(event.is_terminal());
        assert_eq!(event.kind(), "debate_end");
    }

    #[test]
    fn test_unknown_phase_is_rejected() {
        let result: Result<DebateEvent, _> =
            serde_json::from_str(r#"{"type":"phase","phase":"voting","agents":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_metrics_event_serializes_with_tag() {
        let event = DebateEvent::Metrics {
            agent_id: AgentId::new("A"),
            metrics: AgentMetrics {
                completion_tokens: 10,
                completion_time: 2.0,
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "metrics");
        assert_eq!(value["metrics"]["completion_tokens"], 10);
    }
}
