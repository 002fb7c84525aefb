//! JSONL event source replaying a recorded transport.
//!
//! Each non-empty line is one [`DebateEvent`] object. An optional
//! `delay_ms` field paces the replay: the source waits that long (divided
//! by the speed multiplier) before handing the event over. Lines that do
//! not decode are skipped with a warning and counted.

use async_trait::async_trait;
use debate_application::EventSource;
use debate_domain::DebateEvent;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, warn};

/// Field carrying the pause before an event, in milliseconds.
pub const DELAY_FIELD: &str = "delay_ms";

/// Errors opening an event source.
#[derive(Debug, Error)]
pub enum EventSourceError {
    #[error("Could not open event file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Event source reading one JSON object per line.
pub struct JsonlEventSource<R> {
    lines: Lines<R>,
    /// Pacing multiplier; `None` ignores recorded delays.
    speed: Option<f64>,
    line_number: usize,
    skipped: usize,
}

impl JsonlEventSource<BufReader<File>> {
    /// Open a recording on disk.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, EventSourceError> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|source| EventSourceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin + Send> JsonlEventSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            speed: Some(1.0),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Scale recorded delays: 2.0 replays twice as fast. Non-positive
    /// speeds disable pacing.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = (speed.is_finite() && speed > 0.0).then_some(speed);
        self
    }

    /// Hand events over as fast as they are read.
    pub fn unpaced(mut self) -> Self {
        self.speed = None;
        self
    }

    /// Number of lines that could not be decoded so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn decode(line: &str) -> Result<(Option<u64>, DebateEvent), serde_json::Error> {
        let mut value: Value = serde_json::from_str(line)?;
        let delay = value
            .as_object_mut()
            .and_then(|object| object.remove(DELAY_FIELD))
            .and_then(|delay| delay.as_u64());
        let event = serde_json::from_value(value)?;
        Ok((delay, event))
    }

    /// Scaled pause before the next event. A delay too large to represent
    /// is dropped rather than ending the stream.
    fn pause_for(&self, delay_ms: u64) -> Option<Duration> {
        let speed = self.speed?;
        if delay_ms == 0 {
            return None;
        }
        match Duration::try_from_secs_f64(delay_ms as f64 / 1000.0 / speed) {
            Ok(pause) => Some(pause),
            Err(e) => {
                warn!(
                    "Ignoring delay of {}ms on line {} at speed {}: {}",
                    delay_ms, self.line_number, speed, e
                );
                None
            }
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> EventSource for JsonlEventSource<R> {
    async fn next_event(&mut self) -> Option<DebateEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    warn!("Event stream read failed after line {}: {}", self.line_number, e);
                    return None;
                }
            };
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Self::decode(line) {
                Ok((delay, event)) => {
                    if let Some(pause) = delay.and_then(|d| self.pause_for(d)) {
                        tokio::time::sleep(pause).await;
                    }
                    debug!("Line {}: {} event", self.line_number, event.kind());
                    return Some(event);
                }
                Err(e) => {
                    self.skipped += 1;
                    warn!("Skipping malformed event on line {}: {}", self.line_number, e);
                }
            }
        }
    }
}
