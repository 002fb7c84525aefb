//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application and domain types
//! where appropriate.

mod log;
mod output;
mod replay;

pub use log::FileLogConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use replay::FileReplayConfig;

use debate_application::EngineConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("replay.simulation_interval_ms cannot be 0")]
    ZeroSimulationInterval,

    #[error("replay.simulation_range is inverted: [{min}, {max}]")]
    InvertedSimulationRange { min: u64, max: u64 },

    #[error("replay.speed must be a positive number, got {0}")]
    InvalidSpeed(f64),

    #[error("engine.max_agents cannot be 0")]
    ZeroMaxAgents,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate engine policies
    pub engine: EngineConfig,
    /// Replay pacing and simulated throughput
    pub replay: FileReplayConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.engine.max_agents == 0 {
            issues.push(ConfigValidationError::ZeroMaxAgents);
        }
        if !(self.replay.speed.is_finite() && self.replay.speed > 0.0) {
            issues.push(ConfigValidationError::InvalidSpeed(self.replay.speed));
        }
        if self.replay.simulation_interval_ms == 0 {
            issues.push(ConfigValidationError::ZeroSimulationInterval);
        }
        let [min, max] = self.replay.simulation_range;
        if min > max {
            issues.push(ConfigValidationError::InvertedSimulationRange { min, max });
        }

        issues
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.engine.clone()
    }

    /// Simulation tick period, if simulated throughput is enabled.
    pub fn simulation_interval(&self) -> Option<Duration> {
        self.replay
            .simulate_throughput
            .then(|| Duration::from_millis(self.replay.simulation_interval_ms))
    }
}
