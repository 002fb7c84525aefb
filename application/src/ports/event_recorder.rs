//! Port for recording ingested events.
//!
//! Every event the engine ingests can be mirrored to a recorder, producing
//! a transcript that a later session replays through the same engine.
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! human-readable diagnostics, the recorder captures the exact inbound
//! event stream in a machine-readable format (JSONL).

use debate_domain::DebateEvent;

/// Port for recording inbound debate events.
///
/// `record` is synchronous and non-fallible: recording failures must never
/// interrupt ingestion.
pub trait EventRecorder: Send + Sync {
    fn record(&self, event: &DebateEvent);
}

/// No-op implementation for tests and when recording is disabled.
pub struct NoEventRecorder;

impl EventRecorder for NoEventRecorder {
    fn record(&self, _event: &DebateEvent) {}
}

/// In-memory recorder, handy for asserting on what the engine saw.
#[derive(Default)]
pub struct MemoryEventRecorder {
    events: std::sync::Mutex<Vec<DebateEvent>>,
}

impl MemoryEventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DebateEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventRecorder for MemoryEventRecorder {
    fn record(&self, event: &DebateEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_recorder_keeps_order() {
        let recorder = MemoryEventRecorder::new();
        recorder.record(&DebateEvent::DebateEnd);
        recorder.record(&DebateEvent::AgentDone {
            agent_id: "A".into(),
        });
        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "debate_end");
        assert_eq!(events[1].kind(), "agent_done");
    }
}
