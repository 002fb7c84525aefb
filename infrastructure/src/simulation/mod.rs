//! Throughput simulation: the random fallback generator.
//!
//! Provides [`RandomThroughput`], which implements the
//! [`ThroughputSimulator`](debate_application::ThroughputSimulator) port.

mod random_throughput;

pub use random_throughput::RandomThroughput;
