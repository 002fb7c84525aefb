//! Metrics Aggregator
//!
//! Keeps the system-wide throughput derived from the agent records, plus
//! the optional simulated fallback figure shown before any usage arrives.

use crate::debate::agent_store::AgentMap;
use debate_domain::AggregateMetrics;

#[derive(Debug, Default)]
pub struct MetricsAggregator {
    aggregate: AggregateMetrics,
    simulated_tokens_per_second: Option<u64>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the aggregate from the records. Returns whether it changed.
    pub fn recompute(&mut self, records: &AgentMap) -> bool {
        let next = AggregateMetrics::from_records(records.values().map(|r| r.as_ref()));
        let changed = next != self.aggregate;
        self.aggregate = next;
        changed
    }

    pub fn aggregate(&self) -> &AggregateMetrics {
        &self.aggregate
    }

    pub fn simulated(&self) -> Option<u64> {
        self.simulated_tokens_per_second
    }

    /// Store a simulated figure. Returns whether it changed.
    pub fn set_simulated(&mut self, value: Option<u64>) -> bool {
        let changed = self.simulated_tokens_per_second != value;
        self.simulated_tokens_per_second = value;
        changed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{AgentMetrics, AgentRecord, AgentSpec};
    use std::sync::Arc;

    fn map(entries: &[(&str, u64, f64)]) -> AgentMap {
        entries
            .iter()
            .map(|(id, tokens, time)| {
                let mut record = AgentRecord::new(&AgentSpec::new(*id, *id, "#000"));
                record.apply_metrics(&AgentMetrics {
                    completion_tokens: *tokens,
                    completion_time: *time,
                    total_tokens: *tokens,
                    ..Default::default()
                });
                (record.id.clone(), Arc::new(record))
            })
            .collect()
    }

    #[test]
    fn test_recompute_tracks_records() {
        let mut aggregator = MetricsAggregator::new();
        assert!(aggregator.recompute(&map(&[("a", 120, 3.0), ("b", 60, 3.0)])));
        assert_eq!(aggregator.aggregate().tokens_per_second, 30.0);
        assert_eq!(aggregator.aggregate().total_tokens, 180);

        // same input, no change
        assert!(!aggregator.recompute(&map(&[("a", 120, 3.0), ("b", 60, 3.0)])));
    }

    #[test]
    fn test_simulated_value_change_detection() {
        let mut aggregator = MetricsAggregator::new();
        assert!(aggregator.set_simulated(Some(50)));
        assert!(!aggregator.set_simulated(Some(50)));
        assert!(aggregator.set_simulated(None));
        assert_eq!(aggregator.simulated(), None);
    }
}
