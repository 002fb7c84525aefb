//! Simulated throughput port
//!
//! When the backend has not reported any usage yet, a renderer may still
//! want a lively tokens/second figure. The fallback generator is a strategy
//! object injected into the engine and sampled from an external timer, so
//! it can be switched off (or made deterministic) without touching the engine.

/// Produces a fallback tokens/second figure on each tick.
pub trait ThroughputSimulator: Send {
    /// Next simulated value, or `None` when simulation is disabled.
    fn sample(&mut self) -> Option<u64>;
}

/// Disabled simulation (default).
pub struct NoSimulation;

impl ThroughputSimulator for NoSimulation {
    fn sample(&mut self) -> Option<u64> {
        None
    }
}

/// Always reports the same value.
pub struct FixedThroughput(pub u64);

impl ThroughputSimulator for FixedThroughput {
    fn sample(&mut self) -> Option<u64> {
        Some(self.0)
    }
}
