//! Orchestration domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a debate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No debate running yet
    #[default]
    Idle,
    /// The query is dispatched; every agent drafts an independent answer
    Dispatch,
    /// Agents challenge each other's positions
    Conflict,
    /// Positions are merged into a candidate answer
    Synthesis,
    /// Agents converge on the synthesized answer
    Convergence,
    /// The debate is over
    Complete,
}

impl Phase {
    /// All phases in canonical order.
    pub const ALL: [Phase; 6] = [
        Phase::Idle,
        Phase::Dispatch,
        Phase::Conflict,
        Phase::Synthesis,
        Phase::Convergence,
        Phase::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Dispatch => "dispatch",
            Phase::Conflict => "conflict",
            Phase::Synthesis => "synthesis",
            Phase::Convergence => "convergence",
            Phase::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Dispatch => "Dispatch",
            Phase::Conflict => "Conflict",
            Phase::Synthesis => "Synthesis",
            Phase::Convergence => "Convergence",
            Phase::Complete => "Complete",
        }
    }

    /// Position in the canonical order (idle = 0).
    pub fn rank(&self) -> usize {
        match self {
            Phase::Idle => 0,
            Phase::Dispatch => 1,
            Phase::Conflict => 2,
            Phase::Synthesis => 3,
            Phase::Convergence => 4,
            Phase::Complete => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete)
    }
}

impl std::str::FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownPhase(s.to_string()))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parse_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(phase.as_str().parse::<Phase>().unwrap(), phase);
        }
        assert_eq!(" Synthesis ".parse::<Phase>().unwrap(), Phase::Synthesis);
    }

    #[test]
    fn test_phase_parse_unknown() {
        assert_eq!(
            "voting".parse::<Phase>(),
            Err(DomainError::UnknownPhase("voting".to_string()))
        );
    }

    #[test]
    fn test_rank_follows_canonical_order() {
        let ranks: Vec<usize> = Phase::ALL.iter().map(Phase::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
        assert!(Phase::Complete.is_terminal());
        assert!(!Phase::Convergence.is_terminal());
    }

    #[test]
    fn test_phase_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Phase::Convergence).unwrap(),
            "\"convergence\""
        );
        let phase: Phase = serde_json::from_str("\"conflict\"").unwrap();
        assert_eq!(phase, Phase::Conflict);
    }
}
