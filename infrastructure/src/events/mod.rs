//! Event transport adapters for recorded debate streams.
//!
//! Provides [`JsonlEventSource`], which implements the
//! [`EventSource`](debate_application::EventSource) port over a JSONL
//! recording, and [`JsonlEventRecorder`], which implements the
//! [`EventRecorder`](debate_application::EventRecorder) port and produces
//! such recordings.

mod jsonl_recorder;
mod jsonl_source;

pub use jsonl_recorder::JsonlEventRecorder;
pub use jsonl_source::{DELAY_FIELD, EventSourceError, JsonlEventSource};
