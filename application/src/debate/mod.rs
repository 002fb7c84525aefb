//! Debate state components
//!
//! Each component owns one slice of the debate state. The
//! [`DebateEngine`](crate::engine::DebateEngine) composes them and is the
//! only thing that mutates them.

pub mod agent_store;
pub mod checkpoint_manager;
pub mod error;
pub mod metrics;
pub mod phase_controller;
pub mod turn_manager;
pub mod view;

pub use agent_store::{AgentMap, AgentStore};
pub use checkpoint_manager::CheckpointManager;
pub use error::EngineError;
pub use metrics::MetricsAggregator;
pub use phase_controller::PhaseController;
pub use turn_manager::TurnManager;
pub use view::DebateView;
