//! Infrastructure layer for debate-replay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod events;
pub mod simulation;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLogConfig, FileOutputConfig,
    FileOutputFormat, FileReplayConfig,
};
pub use events::{EventSourceError, JsonlEventRecorder, JsonlEventSource};
pub use simulation::RandomThroughput;
