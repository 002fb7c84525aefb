//! Phase Controller
//!
//! Tracks the debate's current phase and which agents were activated for
//! it. Whether a transition is believed is up to the configured
//! [`TransitionPolicy`]; `complete` can always be forced.

use crate::debate::error::EngineError;
use debate_domain::{AgentId, Phase, TransitionPolicy};
use tracing::info;

#[derive(Debug)]
pub struct PhaseController {
    phase: Phase,
    active_agents: Vec<AgentId>,
    policy: TransitionPolicy,
}

impl PhaseController {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            phase: Phase::Idle,
            active_agents: Vec::new(),
            policy,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_agents(&self) -> &[AgentId] {
        &self.active_agents
    }

    /// Check a transition against the policy without applying it.
    pub fn check(&self, to: Phase) -> Result<(), EngineError> {
        if self.policy.allows(self.phase, to) {
            Ok(())
        } else {
            Err(EngineError::IllegalTransition {
                from: self.phase,
                to,
            })
        }
    }

    /// Move to `to` with `agents` active. Returns whether the phase itself changed.
    pub fn transition(&mut self, to: Phase, agents: &[AgentId]) -> Result<bool, EngineError> {
        self.check(to)?;
        let changed = self.phase != to;
        if changed {
            info!("Phase {} -> {}", self.phase, to);
        }
        self.phase = to;
        self.active_agents = agents.to_vec();
        Ok(changed)
    }

    /// Force `complete`, bypassing the policy.
    pub fn force_complete(&mut self) {
        if self.phase != Phase::Complete {
            info!("Phase {} -> {} (forced)", self.phase, Phase::Complete);
        }
        self.phase = Phase::Complete;
        self.active_agents.clear();
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.active_agents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_accepts_backwards_move() {
        let mut controller = PhaseController::new(TransitionPolicy::Permissive);
        assert!(controller.transition(Phase::Synthesis, &[]).unwrap());
        assert!(controller
            .transition(Phase::Dispatch, &[AgentId::new("A")])
            .unwrap());
        assert_eq!(controller.phase(), Phase::Dispatch);
        assert_eq!(controller.active_agents(), &[AgentId::new("A")]);
    }

    #[test]
    fn test_strict_rejects_backwards_move() {
        let mut controller = PhaseController::new(TransitionPolicy::Strict);
        controller.transition(Phase::Conflict, &[]).unwrap();
        assert_eq!(
            controller.transition(Phase::Dispatch, &[]),
            Err(EngineError::IllegalTransition {
                from: Phase::Conflict,
                to: Phase::Dispatch
            })
        );
        assert_eq!(controller.phase(), Phase::Conflict);
    }

    #[test]
    fn test_same_phase_redispatch_reports_no_change() {
        let mut controller = PhaseController::new(TransitionPolicy::Strict);
        controller.transition(Phase::Dispatch, &[AgentId::new("A")]).unwrap();
        assert!(!controller
            .transition(Phase::Dispatch, &[AgentId::new("B")])
            .unwrap());
        assert_eq!(controller.active_agents(), &[AgentId::new("B")]);
    }

    #[test]
    fn test_force_complete_ignores_policy() {
        let mut controller = PhaseController::new(TransitionPolicy::Strict);
        controller.force_complete();
        assert_eq!(controller.phase(), Phase::Complete);
        assert!(controller.transition(Phase::Idle, &[]).is_err());
        controller.reset();
        assert_eq!(controller.phase(), Phase::Idle);
    }
}
