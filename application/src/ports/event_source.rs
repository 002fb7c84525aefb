//! Event source port
//!
//! The transport delivering agent events is external and asynchronous. It
//! is reduced to a pull-based stream of already-decoded [`DebateEvent`]s;
//! decoding failures stay inside the adapter, which skips the offending
//! message instead of ending the stream.

use async_trait::async_trait;
use debate_domain::DebateEvent;
use std::collections::VecDeque;

/// Asynchronous supplier of inbound debate events.
#[async_trait]
pub trait EventSource: Send {
    /// Next event, or `None` once the transport is exhausted or closed.
    async fn next_event(&mut self) -> Option<DebateEvent>;
}

/// Source backed by an in-memory list of events.
#[derive(Debug, Default)]
pub struct VecEventSource {
    events: VecDeque<DebateEvent>,
}

impl VecEventSource {
    pub fn new(events: impl IntoIterator<Item = DebateEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl EventSource for VecEventSource {
    async fn next_event(&mut self) -> Option<DebateEvent> {
        self.events.pop_front()
    }
}
