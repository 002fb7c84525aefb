//! Replay configuration from TOML (`[replay]` section)

use serde::{Deserialize, Serialize};

/// Raw replay configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplayConfig {
    /// Pacing multiplier applied to recorded `delay_ms` values (2.0 = twice as fast)
    pub speed: f64,
    /// Show a simulated tokens/second figure until real usage is reported
    pub simulate_throughput: bool,
    /// Period of simulated throughput samples
    pub simulation_interval_ms: u64,
    /// Inclusive `[min, max]` range of simulated samples
    pub simulation_range: [u64; 2],
    /// Seed for reproducible simulated samples
    pub simulation_seed: Option<u64>,
}

impl Default for FileReplayConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            simulate_throughput: false,
            simulation_interval_ms: 250,
            simulation_range: [40, 120],
            simulation_seed: None,
        }
    }
}
