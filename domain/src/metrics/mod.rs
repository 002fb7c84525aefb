//! Throughput metrics
//!
//! Pure arithmetic shared by the agent records (local estimate) and the
//! engine's aggregator (authoritative totals).

pub mod throughput;
