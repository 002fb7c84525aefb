//! Log configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw log configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Directory for daily-rotated diagnostic logs
    pub dir: Option<PathBuf>,
    /// JSONL file receiving every ingested event
    pub events_path: Option<PathBuf>,
}
