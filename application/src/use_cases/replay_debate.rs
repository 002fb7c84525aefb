//! Replay Debate use case
//!
//! Pumps an [`EventSource`] into a [`DebateEngine`]. The source runs in
//! its own task and hands events over an `mpsc` channel, so the engine
//! stays a plain `&mut` struct and the optional throughput ticker can
//! interleave with ingestion without cancelling a half-read event.

use crate::engine::{DebateEngine, IngestOutcome};
use crate::ports::event_source::EventSource;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

const CHANNEL_CAPACITY: usize = 256;

/// Input for the [`ReplayDebateUseCase`].
#[derive(Debug, Clone)]
pub struct ReplayDebateInput {
    /// Period of simulated throughput ticks; `None` disables them.
    pub tick_interval: Option<Duration>,
    /// Stop at the first `debate_end` instead of draining the source.
    pub stop_at_end: bool,
}

impl Default for ReplayDebateInput {
    fn default() -> Self {
        Self {
            tick_interval: None,
            stop_at_end: true,
        }
    }
}

impl ReplayDebateInput {
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    pub fn draining(mut self) -> Self {
        self.stop_at_end = false;
        self
    }
}

/// Counters of one replay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub applied: usize,
    pub ignored: usize,
    pub rejected: usize,
    pub ticks: usize,
    /// Whether a `debate_end` event was seen.
    pub reached_end: bool,
}

impl ReplayStats {
    fn count(&mut self, outcome: &IngestOutcome) {
        self.events += 1;
        match outcome {
            IngestOutcome::Applied => self.applied += 1,
            IngestOutcome::Ignored => self.ignored += 1,
            IngestOutcome::Rejected(_) => self.rejected += 1,
        }
    }
}

/// Use case for replaying a debate event stream through the engine.
pub struct ReplayDebateUseCase<'a> {
    engine: &'a mut DebateEngine,
}

impl<'a> ReplayDebateUseCase<'a> {
    pub fn new(engine: &'a mut DebateEngine) -> Self {
        Self { engine }
    }

    /// Ingest every event from `source` until it ends (or `debate_end`).
    pub async fn execute<S>(&mut self, mut source: S, input: ReplayDebateInput) -> ReplayStats
    where
        S: EventSource + 'static,
    {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        let pump = tokio::spawn(async move {
            while let Some(event) = source.next_event().await {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        let mut ticker = input.tick_interval.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        let mut stats = ReplayStats::default();
        loop {
            tokio::select! {
                received = rx.recv() => {
                    let Some(event) = received else { break };
                    let terminal = event.is_terminal();
                    let outcome = self.engine.ingest(event);
                    stats.count(&outcome);
                    if terminal {
                        stats.reached_end = true;
                        if input.stop_at_end {
                            break;
                        }
                    }
                }
                _ = next_tick(ticker.as_mut()) => {
                    stats.ticks += 1;
                    if let Some(value) = self.engine.tick_simulated_throughput() {
                        debug!("Simulated throughput: {} tok/s", value);
                    }
                }
            }
        }

        pump.abort();
        info!(
            "Replay finished: {} events ({} applied, {} ignored, {} rejected)",
            stats.events, stats.applied, stats.ignored, stats.rejected
        );
        stats
    }
}

async fn next_tick(ticker: Option<&mut tokio::time::Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::ports::event_source::VecEventSource;
    use crate::ports::throughput::FixedThroughput;
    use async_trait::async_trait;
    use debate_domain::{AgentId, AgentSpec, DebateEvent, Phase};

    fn token(agent: &str, text: &str) -> DebateEvent {
        DebateEvent::Token {
            agent_id: AgentId::new(agent),
            text: text.to_string(),
        }
    }

    fn engine() -> DebateEngine {
        let mut engine = DebateEngine::new(EngineConfig::default());
        engine.start_debate("Q1", vec![AgentSpec::new("A", "Analyst", "#4f46e5")]);
        engine
    }

    #[tokio::test]
    async fn test_replay_counts_outcomes() {
        let mut engine = engine();
        let source = VecEventSource::new(vec![
            token("A", "foo"),
            token("A", "bar"),
            DebateEvent::AgentDone {
                agent_id: AgentId::new("A"),
            },
            DebateEvent::AgentDone {
                agent_id: AgentId::new("A"),
            },
            token("bad id", "x"),
            DebateEvent::DebateEnd,
        ]);

        let stats = ReplayDebateUseCase::new(&mut engine)
            .execute(source, ReplayDebateInput::default())
            .await;

        assert_eq!(stats.events, 6);
        assert_eq!(stats.applied, 4);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.rejected, 1);
        assert!(stats.reached_end);
        assert_eq!(engine.view().agent(&AgentId::new("A")).unwrap().text, "foobar");
        assert_eq!(engine.view().phase, Phase::Complete);
    }

    #[tokio::test]
    async fn test_replay_stops_at_debate_end() {
        let mut engine = engine();
        let source = VecEventSource::new(vec![
            token("A", "kept"),
            DebateEvent::DebateEnd,
            token("A", " dropped"),
        ]);

        let stats = ReplayDebateUseCase::new(&mut engine)
            .execute(source, ReplayDebateInput::default())
            .await;
        assert_eq!(stats.events, 2);
        assert_eq!(engine.view().agent(&AgentId::new("A")).unwrap().text, "kept");
    }

    #[tokio::test]
    async fn test_draining_replay_reads_past_end() {
        let mut engine = engine();
        let source = VecEventSource::new(vec![DebateEvent::DebateEnd, token("A", "late")]);

        let stats = ReplayDebateUseCase::new(&mut engine)
            .execute(source, ReplayDebateInput::default().draining())
            .await;
        assert_eq!(stats.events, 2);
        assert!(stats.reached_end);
    }

    /// Emits its events one second apart.
    struct SlowSource(Vec<DebateEvent>);

    #[async_trait]
    impl EventSource for SlowSource {
        async fn next_event(&mut self) -> Option<DebateEvent> {
            if self.0.is_empty() {
                return None;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
            Some(self.0.remove(0))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_feeds_simulated_throughput() {
        let mut engine = engine().with_simulator(Box::new(FixedThroughput(33)));
        let mut view = engine.subscribe();
        let source = SlowSource(vec![
            DebateEvent::Phase {
                phase: Phase::Dispatch,
                agents: vec![AgentId::new("A")],
            },
            token("A", "thinking"),
            token("A", " out loud"),
        ]);

        let stats = ReplayDebateUseCase::new(&mut engine)
            .execute(
                source,
                ReplayDebateInput::default().with_tick_interval(Duration::from_millis(250)),
            )
            .await;

        assert!(stats.ticks > 0);
        assert!(!stats.reached_end);
        assert_eq!(view.borrow_and_update().simulated_tokens_per_second, Some(33));
    }
}
