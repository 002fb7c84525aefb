//! Domain layer for debate-replay
//!
//! This crate contains the entities and value objects of a multi-agent
//! debate. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Several independent agents stream answers to one query concurrently,
//! moving through ordered [`Phase`]s until a synthesized answer converges:
//!
//! - **Agent records**: live text, streaming flags and throughput per agent
//! - **Checkpoints**: immutable snapshots of every agent's text, used for time travel
//! - **Turns**: completed query/response cycles kept for follow-up conversations
//!
//! ## Events
//!
//! [`DebateEvent`] is the inbound contract of the engine: every transport
//! (websocket, SSE, a recorded JSONL file) is reduced to these variants.

pub mod agent;
pub mod checkpoint;
pub mod config;
pub mod conversation;
pub mod core;
pub mod event;
pub mod metrics;
pub mod orchestration;

// Re-export commonly used types
pub use agent::{
    entities::AgentRecord,
    failure::{AgentFailure, ErrorCategory},
    value_objects::{AgentId, AgentMetrics, AgentSpec},
};
pub use checkpoint::entities::{Checkpoint, CheckpointKind, CheckpointMeta};
pub use config::OutputFormat;
pub use conversation::entities::{DebateTurnSnapshot, FollowUpNode};
pub use core::error::DomainError;
pub use event::DebateEvent;
pub use metrics::throughput::{AggregateMetrics, estimate_tokens_per_second};
pub use orchestration::{entities::Phase, policy::TransitionPolicy};
