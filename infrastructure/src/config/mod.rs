//! Configuration file loading for debate-replay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DEBATE_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/debate-replay/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLogConfig, FileOutputConfig, FileOutputFormat,
    FileReplayConfig,
};
pub use loader::ConfigLoader;
