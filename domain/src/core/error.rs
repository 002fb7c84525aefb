//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid agent id: {0:?}")]
    InvalidAgentId(String),

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),

    #[error("Unknown checkpoint type: {0}")]
    UnknownCheckpointKind(String),

    #[error("Invalid metrics: {0}")]
    InvalidMetrics(String),
}

impl DomainError {
    /// Check if this error was caused by a malformed identifier
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, DomainError::InvalidAgentId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_agent_id_display() {
        let error = DomainError::InvalidAgentId("bad id".to_string());
        assert_eq!(error.to_string(), "Invalid agent id: \"bad id\"");
    }

    #[test]
    fn test_is_invalid_id_check() {
        assert!(DomainError::InvalidAgentId(String::new()).is_invalid_id());
        assert!(!DomainError::UnknownPhase("x".to_string()).is_invalid_id());
        assert!(!DomainError::InvalidMetrics("x".to_string()).is_invalid_id());
    }
}
