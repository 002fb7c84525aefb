//! Application layer for debate-replay
//!
//! This crate contains the debate state engine, its components, port
//! definitions, engine configuration and use cases. It depends only on the
//! domain layer.

pub mod config;
pub mod debate;
pub mod engine;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AdmissionPolicy, AutoCheckpoint, EngineConfig, ResumeMode};
pub use debate::{AgentMap, DebateView, EngineError};
pub use engine::{DebateEngine, IngestOutcome};
pub use ports::{
    clock::{Clock, ManualClock, SystemClock},
    event_recorder::{EventRecorder, MemoryEventRecorder, NoEventRecorder},
    event_source::{EventSource, VecEventSource},
    throughput::{FixedThroughput, NoSimulation, ThroughputSimulator},
};
pub use use_cases::replay_debate::{ReplayDebateInput, ReplayDebateUseCase, ReplayStats};
