//! Engine error types

use debate_domain::{AgentId, DomainError, Phase};
use thiserror::Error;

/// Errors raised while applying a mutation to the debate state.
///
/// None of these ever abort ingestion: the facade routes them to the
/// originating agent's error state or to the global error banner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentId),

    #[error("Agent roster is full ({max} agents), rejected {id}")]
    RosterFull { id: AgentId, max: usize },

    #[error("Illegal phase transition: {from} -> {to}")]
    IllegalTransition { from: Phase, to: Phase },

    #[error("Invalid metrics from {agent_id}: {reason}")]
    InvalidMetrics { agent_id: AgentId, reason: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    /// The agent this error is attributable to, if any.
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            EngineError::UnknownAgent(id) => Some(id),
            EngineError::RosterFull { id, .. } => Some(id),
            EngineError::InvalidMetrics { agent_id, .. } => Some(agent_id),
            EngineError::IllegalTransition { .. } | EngineError::Domain(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::IllegalTransition {
            from: Phase::Synthesis,
            to: Phase::Dispatch,
        };
        assert_eq!(
            error.to_string(),
            "Illegal phase transition: Synthesis -> Dispatch"
        );
    }

    #[test]
    fn test_agent_attribution() {
        let id = AgentId::new("A");
        assert_eq!(EngineError::UnknownAgent(id.clone()).agent_id(), Some(&id));
        assert_eq!(
            EngineError::Domain(DomainError::InvalidAgentId(String::new())).agent_id(),
            None
        );
    }
}
