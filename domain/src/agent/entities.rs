//! Agent record entity - the live state of one debate participant.

use super::failure::AgentFailure;
use super::value_objects::{AgentId, AgentMetrics, AgentSpec};
use crate::metrics::throughput::estimate_tokens_per_second;
use crate::orchestration::entities::Phase;
use serde::{Deserialize, Serialize};

/// Live state of one agent during a turn.
///
/// `text` only ever grows while a turn is running. The only operations that
/// replace it wholesale are checkpoint restoration ([`AgentRecord::restore_text`])
/// and starting a new turn ([`AgentRecord::fresh`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub display_name: String,
    pub color: String,

    pub text: String,
    pub is_active: bool,
    pub is_streaming: bool,
    pub phase: Option<Phase>,

    // -- Locally estimated throughput --
    pub token_count: u64,
    pub tokens_per_second: u64,
    /// Clock reading (ms) of the first token of the current stream.
    pub stream_start_ms: Option<u64>,

    // -- Authoritative usage (from a metrics event) --
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Seconds the backend spent producing the completion.
    pub completion_time: f64,

    pub failure: Option<AgentFailure>,
}

impl AgentRecord {
    pub fn new(spec: &AgentSpec) -> Self {
        Self {
            id: spec.id.clone(),
            display_name: spec.display_name.clone(),
            color: spec.color.clone(),
            text: String::new(),
            is_active: false,
            is_streaming: false,
            phase: None,
            token_count: 0,
            tokens_per_second: 0,
            stream_start_ms: None,
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            completion_time: 0.0,
            failure: None,
        }
    }

    /// Empty record carrying over only the presentation metadata.
    pub fn fresh(&self) -> Self {
        Self::new(&self.spec())
    }

    pub fn spec(&self) -> AgentSpec {
        AgentSpec::new(self.id.clone(), self.display_name.clone(), self.color.clone())
    }

    /// Append a streamed chunk and refresh the local throughput estimate.
    ///
    /// The first chunk of a stream anchors the measurement window; a new
    /// window starts after [`AgentRecord::finish_stream`].
    pub fn append(&mut self, chunk: &str, now_ms: u64) {
        self.text.push_str(chunk);
        self.is_streaming = true;

        let start = match self.stream_start_ms {
            Some(start) => start,
            None => {
                self.token_count = 0;
                self.stream_start_ms = Some(now_ms);
                now_ms
            }
        };

        self.token_count += 1;
        self.tokens_per_second =
            estimate_tokens_per_second(self.token_count, now_ms.saturating_sub(start));
    }

    /// Stop streaming. Returns `false` when the record was already idle.
    pub fn finish_stream(&mut self) -> bool {
        let was_streaming = self.is_streaming || self.stream_start_ms.is_some();
        self.is_streaming = false;
        self.stream_start_ms = None;
        was_streaming
    }

    /// Stop streaming and deactivate, keeping the partial text.
    pub fn fail(&mut self, failure: AgentFailure) {
        self.is_streaming = false;
        self.is_active = false;
        self.stream_start_ms = None;
        self.failure = Some(failure);
    }

    /// Overwrite throughput fields with backend-reported figures.
    pub fn apply_metrics(&mut self, metrics: &AgentMetrics) {
        self.tokens_per_second = metrics.tokens_per_second.max(0.0).round() as u64;
        self.total_tokens = metrics.total_tokens;
        self.prompt_tokens = metrics.prompt_tokens;
        self.completion_tokens = metrics.completion_tokens;
        self.completion_time = metrics.completion_time;
    }

    /// Assign the agent to a phase; it is expected to stream in it.
    pub fn enter_phase(&mut self, phase: Phase) {
        self.phase = Some(phase);
        self.is_active = true;
        self.is_streaming = true;
    }

    /// Replace the text with a checkpointed snapshot.
    pub fn restore_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Copy of this record as it looked in a checkpoint: paused, with `text`.
    pub fn paused_at(&self, text: &str) -> Self {
        let mut record = self.clone();
        record.restore_text(text);
        record.is_streaming = false;
        record
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Whether authoritative usage figures were reported for this agent.
    pub fn has_reported_metrics(&self) -> bool {
        self.completion_tokens > 0 || self.completion_time > 0.0
    }
}
