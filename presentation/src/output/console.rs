//! Console output formatter for debate views

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use debate_application::DebateView;
use debate_domain::{AgentRecord, Checkpoint};

/// Formats debate views for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete view
    pub fn format(view: &DebateView) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Replay"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), view.query));
        output.push_str(&format!(
            "{} {}  {} {}\n",
            "Turn:".cyan().bold(),
            view.current_turn_index,
            "Phase:".cyan().bold(),
            view.phase.display_name()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Throughput:".cyan().bold(),
            Self::throughput(view)
        ));

        if let Some(index) = view.active_checkpoint_index
            && let Some(checkpoint) = view.checkpoints.get(index)
        {
            output.push_str(&format!(
                "\n{}\n",
                format!(
                    "Viewing checkpoint {}/{}: {}",
                    index + 1,
                    view.checkpoints.len(),
                    checkpoint.label
                )
                .yellow()
                .bold()
            ));
        }

        if let Some(error) = &view.error {
            output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), error));
        }

        output.push_str(&Self::section_header("Agents"));
        if view.agents.is_empty() {
            output.push_str(&format!("\n{}\n", "(no agents)".dimmed()));
        }
        for record in view.agents.values() {
            output.push_str(&Self::agent_block(record));
        }

        if !view.checkpoints.is_empty() {
            output.push_str(&Self::section_header("Checkpoints"));
            for (index, checkpoint) in view.checkpoints.iter().enumerate() {
                let active = view.active_checkpoint_index == Some(index);
                output.push_str(&Self::checkpoint_line(index, checkpoint, active));
            }
        }

        if !view.constraints.is_empty() {
            output.push_str(&format!("\n{}\n", "Constraints:".cyan().bold()));
            for constraint in view.constraints.iter() {
                output.push_str(&format!("  * {}\n", constraint));
            }
        }

        if !view.completed_turns.is_empty() || !view.follow_up_nodes.is_empty() {
            output.push_str(&Self::section_header("Conversation"));
            for turn in view.completed_turns.iter() {
                output.push_str(&format!(
                    "  {} {} ({} agents)\n",
                    format!("Turn {}:", turn.turn_index).bold(),
                    turn.query,
                    turn.agent_texts.len()
                ));
                for node in view
                    .follow_up_nodes
                    .iter()
                    .filter(|node| node.turn_index == turn.turn_index + 1)
                {
                    output.push_str(&format!(
                        "    {} {} {}\n",
                        "->".cyan(),
                        node.question,
                        format!("[{}]", node.id).dimmed()
                    ));
                }
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(view: &DebateView) -> String {
        serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one line per agent (concise output)
    pub fn format_summary(view: &DebateView) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Debate Summary ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n", "Q:".bold(), view.query));
        output.push_str(&format!(
            "{} {}  {} {}\n\n",
            "Phase:".dimmed(),
            view.phase.display_name(),
            "Checkpoints:".dimmed(),
            view.checkpoints.len()
        ));

        for record in view.agents.values() {
            output.push_str(&format!(
                "  {} {:<24} {:>8} chars  {:>5} tok/s\n",
                Self::status_tag(record),
                Self::agent_name(record),
                record.text.chars().count(),
                record.tokens_per_second
            ));
        }

        output.push_str(&format!(
            "\n{} {}  {} {}\n",
            "Total tokens:".dimmed(),
            view.total_tokens,
            "Throughput:".dimmed(),
            Self::throughput(view)
        ));
        if let Some(error) = &view.error {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }

        output
    }

    fn agent_block(record: &AgentRecord) -> String {
        let title = format!("── {} ({}) ──", record.display_name, record.id);
        let mut block = format!(
            "\n{} {}\n",
            Self::paint(&title, &record.color).bold(),
            Self::status_tag(record)
        );

        if record.text.is_empty() {
            block.push_str(&format!("{}\n", "(no output)".dimmed()));
        } else {
            block.push_str(&record.text);
            block.push('\n');
        }

        if let Some(failure) = &record.failure {
            block.push_str(&format!("{} {}\n", "Error:".red().bold(), failure));
        }

        let tokens = if record.has_reported_metrics() {
            format!(
                "{} tokens ({} prompt, {} completion) in {:.1}s",
                record.total_tokens,
                record.prompt_tokens,
                record.completion_tokens,
                record.completion_time
            )
        } else {
            format!("~{} tokens, {} tok/s", record.token_count, record.tokens_per_second)
        };
        block.push_str(&format!("{}\n", tokens.dimmed()));
        block
    }

    fn checkpoint_line(index: usize, checkpoint: &Checkpoint, active: bool) -> String {
        let marker = if active { ">".yellow().bold() } else { " ".normal() };
        format!(
            "{} [{}] {:>7}ms  {:<16} {}\n",
            marker,
            index,
            checkpoint.timestamp_ms,
            checkpoint.kind.as_str(),
            checkpoint.label
        )
    }

    fn status_tag(record: &AgentRecord) -> ColoredString {
        if record.has_failed() {
            "[failed]".red()
        } else if record.is_streaming {
            "[streaming]".yellow()
        } else if !record.text.is_empty() {
            "[done]".green()
        } else {
            "[idle]".dimmed()
        }
    }

    fn agent_name(record: &AgentRecord) -> ColoredString {
        Self::paint(&record.display_name, &record.color)
    }

    fn throughput(view: &DebateView) -> String {
        let figure = view.display_tokens_per_second();
        if view.tokens_per_second <= 0.0 && view.simulated_tokens_per_second.is_some() {
            format!("{:.1} tok/s (simulated)", figure)
        } else {
            format!("{:.1} tok/s", figure)
        }
    }

    /// Paint `text` with a `#rrggbb` agent color, falling back to yellow.
    fn paint(text: &str, color: &str) -> ColoredString {
        match parse_hex_color(color) {
            Some((r, g, b)) => text.truecolor(r, g, b),
            None => text.yellow(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, view: &DebateView) -> String {
        Self::format(view)
    }

    fn format_json(&self, view: &DebateView) -> String {
        Self::format_json(view)
    }

    fn format_summary(&self, view: &DebateView) -> String {
        Self::format_summary(view)
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_application::{DebateEngine, EngineConfig};
    use debate_domain::{AgentId, AgentMetrics, AgentSpec, CheckpointKind, OutputFormat};

    fn replayed_view() -> DebateView {
        let mut engine = DebateEngine::new(EngineConfig::default());
        engine.start_debate(
            "Should we expand?",
            vec![
                AgentSpec::new("cfo", "Chief Financial Officer", "#4f46e5"),
                AgentSpec::new("legal", "Legal", "not-a-color"),
            ],
        );
        engine.append_token(&AgentId::new("cfo"), "Margins are thin.").unwrap();
        engine.set_agent_done(&AgentId::new("cfo"));
        engine
            .set_agent_metrics(
                &AgentId::new("cfo"),
                &AgentMetrics {
                    tokens_per_second: 42.0,
                    total_tokens: 120,
                    prompt_tokens: 20,
                    completion_tokens: 100,
                    completion_time: 2.5,
                },
            )
            .unwrap();
        engine
            .set_agent_error(&AgentId::new("legal"), "rate limit exceeded")
            .unwrap();
        engine.checkpoint_now(CheckpointKind::AgentCompleted, "CFO done", None, None);
        engine.view()
    }

    #[test]
    fn test_format_full_view() {
        let output = ConsoleFormatter::format(&replayed_view());
        assert!(output.contains("Should we expand?"));
        assert!(output.contains("Margins are thin."));
        assert!(output.contains("Chief Financial Officer"));
        assert!(output.contains("rate limit exceeded"));
        assert!(output.contains("CFO done"));
        assert!(output.contains("120 tokens"));
    }

    #[test]
    fn test_format_marks_time_travel() {
        let mut engine = DebateEngine::new(EngineConfig::default());
        engine.start_debate("Q", vec![AgentSpec::new("a", "A", "#000000")]);
        engine.append_token(&AgentId::new("a"), "foo").unwrap();
        engine.checkpoint_now(CheckpointKind::AgentCompleted, "first", None, None);
        engine.append_token(&AgentId::new("a"), "bar").unwrap();
        assert!(engine.jump_to_checkpoint(0));

        let output = ConsoleFormatter::format(&engine.view());
        assert!(output.contains("Viewing checkpoint 1/1: first"));
        assert!(!output.contains("foobar"));
    }

    #[test]
    fn test_format_summary_lists_every_agent() {
        let output = ConsoleFormatter::format_summary(&replayed_view());
        assert!(output.contains("Debate Summary"));
        assert!(output.contains("Chief Financial Officer"));
        assert!(output.contains("Legal"));
        assert!(output.contains("120"));
        assert!(output.contains("40.0 tok/s"));
    }

    #[test]
    fn test_format_json_is_parseable() {
        let json = ConsoleFormatter::format_json(&replayed_view());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"], "Should we expand?");
        assert_eq!(value["agents"]["cfo"]["text"], "Margins are thin.");
        assert_eq!(value["checkpoints"][0]["label"], "CFO done");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let view = replayed_view();
        let formatter = ConsoleFormatter;
        assert!(formatter.render(&view, OutputFormat::Json).starts_with('{'));
        assert!(formatter.render(&view, OutputFormat::Summary).contains("Debate Summary"));
        assert!(formatter.render(&view, OutputFormat::Full).contains("Agents"));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4f46e5"), Some((0x4f, 0x46, 0xe5)));
        assert_eq!(parse_hex_color("4f46e5"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }
}
