//! Live progress for a replaying debate
//!
//! [`LiveReporter`] draws one spinner per agent plus a status line, fed by
//! the views the engine publishes. Records whose `Arc` did not change since
//! the last view are skipped.

use colored::Colorize;
use debate_application::DebateView;
use debate_domain::{AgentId, AgentRecord};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const TICK: Duration = Duration::from_millis(120);
const PREVIEW_CHARS: usize = 48;

struct AgentBar {
    bar: ProgressBar,
    last: Arc<AgentRecord>,
}

/// Spinners reflecting the latest debate view
pub struct LiveReporter {
    multi: MultiProgress,
    status: ProgressBar,
    agents: HashMap<AgentId, AgentBar>,
    last_version: u64,
}

impl LiveReporter {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Reporter that tracks state without drawing anything.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let status = multi.add(ProgressBar::new_spinner());
        status.set_style(Self::status_style());
        status.set_prefix("debate");
        Self {
            multi,
            status,
            agents: HashMap::new(),
            last_version: 0,
        }
    }

    fn status_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn agent_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Number of agents with a spinner.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Current status line.
    pub fn status_message(&self) -> String {
        self.status.message()
    }

    /// Current line of one agent's spinner.
    pub fn agent_message(&self, id: &AgentId) -> Option<String> {
        self.agents.get(id).map(|entry| entry.bar.message())
    }

    /// Bring the spinners in line with `view`. Returns whether anything was redrawn.
    pub fn update(&mut self, view: &DebateView) -> bool {
        if view.version != 0 && view.version == self.last_version {
            return false;
        }
        self.last_version = view.version;

        self.status.set_message(Self::status_line(view));

        for (id, record) in view.agents.iter() {
            match self.agents.get_mut(id) {
                Some(entry) if Arc::ptr_eq(&entry.last, record) => {}
                Some(entry) => {
                    entry.last = Arc::clone(record);
                    Self::draw_agent(&entry.bar, record);
                }
                None => {
                    let bar = self.multi.add(ProgressBar::new_spinner());
                    bar.set_style(Self::agent_style());
                    bar.set_prefix(record.display_name.clone());
                    bar.enable_steady_tick(TICK);
                    Self::draw_agent(&bar, record);
                    self.agents.insert(
                        id.clone(),
                        AgentBar {
                            bar,
                            last: Arc::clone(record),
                        },
                    );
                }
            }
        }

        // agents dropped by a new debate
        self.agents.retain(|id, entry| {
            let keep = view.agents.contains_key(id);
            if !keep {
                entry.bar.finish_and_clear();
            }
            keep
        });
        true
    }

    /// Stop every spinner, leaving the last lines on screen.
    pub fn finish(&self) {
        for entry in self.agents.values() {
            entry.bar.finish();
        }
        self.status.finish();
    }

    /// Follow the view channel until `cancel` fires or the engine is dropped.
    pub fn spawn(
        mut self,
        mut views: watch::Receiver<DebateView>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.status.enable_steady_tick(TICK);
            loop {
                let view = views.borrow_and_update().clone();
                self.update(&view);

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = views.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            let view = views.borrow().clone();
            self.update(&view);
            self.finish();
        })
    }

    fn status_line(view: &DebateView) -> String {
        let mut line = format!(
            "{}  {} streaming  {:.1} tok/s",
            view.phase.display_name(),
            view.streaming_count(),
            view.display_tokens_per_second()
        );
        if let Some(index) = view.active_checkpoint_index {
            line.push_str(&format!("  {}", format!("@ checkpoint {}", index).yellow()));
        }
        if let Some(error) = &view.error {
            line.push_str(&format!("  {}", error.red()));
        }
        line
    }

    fn draw_agent(bar: &ProgressBar, record: &AgentRecord) {
        let state = if record.has_failed() {
            "x failed".red().to_string()
        } else if record.is_streaming {
            format!("{} tok/s", record.tokens_per_second)
        } else if record.text.is_empty() {
            "waiting".dimmed().to_string()
        } else {
            "v done".green().to_string()
        };
        bar.set_message(format!("{}  {}", state, Self::preview(&record.text)));
    }

    /// Tail of the text on one line.
    fn preview(text: &str) -> String {
        let flat: String = text
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();
        let count = flat.chars().count();
        if count <= PREVIEW_CHARS {
            return flat;
        }
        let tail: String = flat.chars().skip(count - PREVIEW_CHARS).collect();
        format!("...{}", tail)
    }
}

impl Default for LiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_application::{DebateEngine, EngineConfig};
    use debate_domain::{AgentSpec, Phase};

    fn engine() -> DebateEngine {
        let mut engine = DebateEngine::new(EngineConfig::default());
        engine.start_debate(
            "Q",
            vec![
                AgentSpec::new("a", "Analyst", "#4f8cff"),
                AgentSpec::new("b", "Skeptic", "#ff7a59"),
            ],
        );
        engine
    }

    #[test]
    fn test_update_creates_one_spinner_per_agent() {
        let engine = engine();
        let mut reporter = LiveReporter::hidden();
        assert!(reporter.update(&engine.view()));
        assert_eq!(reporter.agent_count(), 2);
        assert!(
            reporter
                .agent_message(&AgentId::new("a"))
                .unwrap()
                .contains("waiting")
        );
    }

    #[test]
    fn test_same_version_is_skipped() {
        let engine = engine();
        let mut reporter = LiveReporter::hidden();
        let view = engine.view();
        assert!(reporter.update(&view));
        assert!(!reporter.update(&view));
    }

    #[test]
    fn test_only_changed_records_are_redrawn() {
        let mut engine = engine();
        let mut reporter = LiveReporter::hidden();
        reporter.update(&engine.view());
        let before_b = reporter.agent_message(&AgentId::new("b"));

        engine.append_token(&AgentId::new("a"), "Revenue grows").unwrap();
        reporter.update(&engine.view());

        assert!(
            reporter
                .agent_message(&AgentId::new("a"))
                .unwrap()
                .contains("Revenue grows")
        );
        assert_eq!(reporter.agent_message(&AgentId::new("b")), before_b);
    }

    #[test]
    fn test_status_line_tracks_phase_and_errors() {
        let mut engine = engine();
        let mut reporter = LiveReporter::hidden();
        engine
            .set_phase(Phase::Dispatch, &[AgentId::new("a"), AgentId::new("b")])
            .unwrap();
        engine.set_error(Some("transport closed".to_string()));
        reporter.update(&engine.view());

        let status = reporter.status_message();
        assert!(status.contains(Phase::Dispatch.display_name()));
        assert!(status.contains("2 streaming"));
        assert!(status.contains("transport closed"));
    }

    #[test]
    fn test_agents_of_previous_debate_are_dropped() {
        let mut engine = engine();
        let mut reporter = LiveReporter::hidden();
        reporter.update(&engine.view());

        engine.start_debate("Q2", vec![AgentSpec::new("c", "Chair", "#2ec4b6")]);
        reporter.update(&engine.view());
        assert_eq!(reporter.agent_count(), 1);
        assert!(reporter.agent_message(&AgentId::new("a")).is_none());
    }

    #[test]
    fn test_preview_keeps_tail_on_one_line() {
        assert_eq!(LiveReporter::preview("a\nb"), "a b");
        let long = "x".repeat(60) + "END";
        let preview = LiveReporter::preview(&long);
        assert!(preview.starts_with("..."));
        assert!(preview.ends_with("END"));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[tokio::test]
    async fn test_spawned_reporter_stops_on_cancel() {
        let mut engine = engine();
        let cancel = CancellationToken::new();
        let handle = LiveReporter::hidden().spawn(engine.subscribe(), cancel.clone());

        engine.append_token(&AgentId::new("a"), "foo").unwrap();
        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_spawned_reporter_stops_when_engine_drops() {
        let engine = engine();
        let handle = LiveReporter::hidden().spawn(engine.subscribe(), CancellationToken::new());
        drop(engine);
        handle.await.unwrap();
    }
}
