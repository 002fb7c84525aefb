//! Token throughput arithmetic.

use crate::agent::entities::AgentRecord;
use serde::{Deserialize, Serialize};

/// Locally estimated tokens per second: `round(tokens / elapsed_seconds)`.
///
/// Returns 0 until some time has elapsed since the stream started.
pub fn estimate_tokens_per_second(token_count: u64, elapsed_ms: u64) -> u64 {
    if elapsed_ms == 0 {
        return 0;
    }
    let elapsed_seconds = elapsed_ms as f64 / 1000.0;
    (token_count as f64 / elapsed_seconds).round() as u64
}

/// System-wide totals derived from the authoritative per-agent figures.
///
/// Always recomputed from the records, never edited in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub tokens_per_second: f64,
    pub total_completion_tokens: u64,
    /// Seconds.
    pub total_completion_time: f64,
    pub total_tokens: u64,
}

impl AggregateMetrics {
    /// Sum completion tokens and times over agents reporting both as nonzero and
    /// derive the global rate (0 when no completion time was reported).
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AgentRecord>) -> Self {
        let mut aggregate = Self::default();

        for record in records {
            // numerator and denominator must cover the same agents
            if record.completion_tokens > 0 && record.completion_time > 0.0 {
                aggregate.total_completion_tokens += record.completion_tokens;
                aggregate.total_completion_time += record.completion_time;
            }
            aggregate.total_tokens += record.total_tokens;
        }

        aggregate.tokens_per_second = if aggregate.total_completion_time > 0.0 {
            aggregate.total_completion_tokens as f64 / aggregate.total_completion_time
        } else {
            0.0
        };

        aggregate
    }

    /// Whether any agent reported authoritative usage.
    pub fn is_reported(&self) -> bool {
        self.total_completion_time > 0.0
    }
}
