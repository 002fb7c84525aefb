//! Application-level configuration.
//!
//! - [`EngineConfig`] - policies controlling how the debate engine treats
//!   unknown agents, phase changes, time-travel exit and automatic checkpoints

pub mod engine_config;

pub use engine_config::{AdmissionPolicy, AutoCheckpoint, EngineConfig, ResumeMode};
