//! JSONL file writer for ingested events.
//!
//! Each [`DebateEvent`] is serialized as a single JSON line carrying its
//! `type` tag, a `recorded_at` timestamp and the `delay_ms` since the
//! previous event, so [`JsonlEventSource`](super::JsonlEventSource) can
//! replay the file at its original pace.

use debate_application::EventRecorder;
use debate_domain::DebateEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::warn;

use super::jsonl_source::DELAY_FIELD;

struct Inner {
    writer: BufWriter<File>,
    last_recorded: Option<Instant>,
}

/// JSONL event recorder that writes one JSON object per line.
///
/// Thread-safe via `Mutex`. Flushes on `Drop`.
pub struct JsonlEventRecorder {
    inner: Mutex<Inner>,
    path: PathBuf,
}

impl JsonlEventRecorder {
    /// Create a new recorder writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            inner: Mutex::new(Inner {
                writer: BufWriter::new(file),
                last_recorded: None,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventRecorder for JsonlEventRecorder {
    fn record(&self, event: &DebateEvent) {
        let Ok(serde_json::Value::Object(mut record)) = serde_json::to_value(event) else {
            return;
        };
        let recorded_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        record.insert("recorded_at".to_string(), recorded_at.into());

        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let now = Instant::now();
        let delay_ms = inner
            .last_recorded
            .map(|last| now.duration_since(last).as_millis() as u64)
            .unwrap_or(0);
        inner.last_recorded = Some(now);
        record.insert(DELAY_FIELD.to_string(), delay_ms.into());

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        let _ = writeln!(inner.writer, "{}", line);
        // Flush per line for crash safety; JSONL is append-only
        let _ = inner.writer.flush();
    }
}

impl Drop for JsonlEventRecorder {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            let _ = inner.writer.flush();
        }
    }
}
