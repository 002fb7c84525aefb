//! Phase transition policy
//!
//! The backend decides when phases change; the engine only decides whether
//! it believes the change. `Permissive` mirrors a backend that may re-dispatch
//! at will, `Strict` only lets the debate move forward.

use super::entities::Phase;
use serde::{Deserialize, Serialize};

/// Which phase changes the engine accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any phase may follow any phase.
    #[default]
    Permissive,
    /// Forward-only: the target must not precede the current phase, and
    /// nothing leaves `complete` except `complete` itself.
    Strict,
}

impl TransitionPolicy {
    pub fn allows(&self, from: Phase, to: Phase) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => {
                if from.is_terminal() {
                    return to.is_terminal();
                }
                to.rank() >= from.rank()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_allows_everything() {
        for from in Phase::ALL {
            for to in Phase::ALL {
                assert!(TransitionPolicy::Permissive.allows(from, to));
            }
        }
    }

    #[test]
    fn test_strict_is_forward_only() {
        let strict = TransitionPolicy::Strict;
        assert!(strict.allows(Phase::Idle, Phase::Dispatch));
        assert!(strict.allows(Phase::Dispatch, Phase::Synthesis));
        assert!(strict.allows(Phase::Conflict, Phase::Conflict));
        assert!(!strict.allows(Phase::Synthesis, Phase::Dispatch));
    }

    #[test]
    fn test_strict_complete_is_terminal() {
        let strict = TransitionPolicy::Strict;
        assert!(strict.allows(Phase::Complete, Phase::Complete));
        assert!(!strict.allows(Phase::Complete, Phase::Dispatch));
        assert!(!strict.allows(Phase::Complete, Phase::Idle));
    }
}
