//! Engine parameters: policy knobs of the debate engine.
//!
//! [`EngineConfig`] groups the static parameters that shape how
//! [`DebateEngine`](crate::engine::DebateEngine) reacts to inbound events.
//! Defaults reproduce the lenient behaviour a browser client expects; the
//! strict variants are hardening options.

use debate_domain::TransitionPolicy;
use serde::{Deserialize, Serialize};

/// How agent ids that are not on the roster are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// Unknown (but well-formed) ids join the debate on first reference.
    #[default]
    Dynamic,
    /// Only roster ids are accepted; anything else is rejected.
    Strict,
}

/// What `exit_time_travel` restores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeMode {
    /// Texts are restored from the last checkpoint. Output streamed after
    /// that checkpoint while the user was time travelling is not shown.
    #[default]
    LastCheckpoint,
    /// The live texts, kept up to date during time travel, are shown again.
    LiveEdge,
}

/// Milestones that create a checkpoint without being told to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoCheckpoint {
    /// Checkpoint when an agent finishes its stream.
    pub on_agent_done: bool,
    /// Checkpoint when a phase starts.
    pub on_phase_start: bool,
}

/// Debate engine policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub admission: AdmissionPolicy,
    pub transitions: TransitionPolicy,
    pub resume: ResumeMode,
    pub auto_checkpoint: AutoCheckpoint,
    /// Roster ceiling for dynamically admitted agents.
    pub max_agents: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admission: AdmissionPolicy::Dynamic,
            transitions: TransitionPolicy::Permissive,
            resume: ResumeMode::LastCheckpoint,
            auto_checkpoint: AutoCheckpoint::default(),
            max_agents: 8,
        }
    }
}

impl EngineConfig {
    // ==================== Builder Methods ====================

    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }

    pub fn with_transitions(mut self, transitions: TransitionPolicy) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn with_resume(mut self, resume: ResumeMode) -> Self {
        self.resume = resume;
        self
    }

    pub fn with_auto_checkpoint(mut self, auto_checkpoint: AutoCheckpoint) -> Self {
        self.auto_checkpoint = auto_checkpoint;
        self
    }

    pub fn with_max_agents(mut self, max_agents: usize) -> Self {
        self.max_agents = max_agents;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert_eq!(config.admission, AdmissionPolicy::Dynamic);
        assert_eq!(config.transitions, TransitionPolicy::Permissive);
        assert_eq!(config.resume, ResumeMode::LastCheckpoint);
        assert!(!config.auto_checkpoint.on_agent_done);
        assert!(!config.auto_checkpoint.on_phase_start);
        assert_eq!(config.max_agents, 8);
    }

    #[test]
    fn test_builder_chain() {
        let config = EngineConfig::default()
            .with_admission(AdmissionPolicy::Strict)
            .with_transitions(TransitionPolicy::Strict)
            .with_resume(ResumeMode::LiveEdge)
            .with_max_agents(3);
        assert_eq!(config.admission, AdmissionPolicy::Strict);
        assert_eq!(config.transitions, TransitionPolicy::Strict);
        assert_eq!(config.resume, ResumeMode::LiveEdge);
        assert_eq!(config.max_agents, 3);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"resume":"live_edge","auto_checkpoint":{"on_agent_done":true}}"#)
                .unwrap();
        assert_eq!(config.resume, ResumeMode::LiveEdge);
        assert!(config.auto_checkpoint.on_agent_done);
        assert!(!config.auto_checkpoint.on_phase_start);
        assert_eq!(config.max_agents, 8);
    }
}
