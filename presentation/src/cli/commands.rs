//! CLI command definitions

use clap::{Parser, ValueEnum};
use debate_domain::{AgentId, AgentSpec};
use std::path::PathBuf;

/// Output format for the final debate view
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every agent's text, checkpoints and conversation history
    Full,
    /// One line per agent plus totals
    Summary,
    /// The view as JSON
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for debate-replay
#[derive(Parser, Debug)]
#[command(name = "debate-replay")]
#[command(author, version, about = "Replay a recorded multi-agent debate through the debate engine")]
#[command(long_about = r#"
Debate Replay feeds a recorded event stream (JSONL, one event per line)
through the debate state engine and prints the resulting view.

Each line is a JSON object tagged by "type": token, metrics, phase,
agent_done, agent_error, checkpoint or debate_end. An optional "delay_ms"
field paces the replay.

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables (e.g. DEBATE_REPLAY__SPEED=4)
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/debate-replay/config.toml   Global config

Example:
  debate-replay session.jsonl --query "Should we expand to Europe?"
  debate-replay session.jsonl --jump 2 --output full
  debate-replay turn1.jsonl --follow-up "What about hiring?" --follow-up-events turn2.jsonl
"#)]
pub struct Cli {
    /// Recorded event stream of the first turn
    #[arg(value_name = "EVENTS")]
    pub events: PathBuf,

    /// Query of the first turn (defaults to the file name)
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Roster entry `id[:Display Name[:#rrggbb]]` (can be specified multiple times)
    #[arg(short, long = "agent", value_name = "AGENT", value_parser = parse_agent_spec)]
    pub agents: Vec<AgentSpec>,

    /// After the replay, view checkpoint INDEX instead of the live edge
    #[arg(long, value_name = "INDEX")]
    pub jump: Option<usize>,

    /// Leave time travel again after --jump
    #[arg(long, requires = "jump")]
    pub exit_time_travel: bool,

    /// Follow-up question starting a new turn (can be specified multiple times)
    #[arg(long = "follow-up", value_name = "QUESTION")]
    pub follow_ups: Vec<String>,

    /// Recorded event stream of the matching --follow-up turn
    #[arg(long = "follow-up-events", value_name = "PATH")]
    pub follow_up_events: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Replay speed multiplier applied to recorded delays
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f64>,

    /// Show a simulated tokens/second figure until real usage arrives
    #[arg(long)]
    pub simulate_throughput: bool,

    /// Record every ingested event to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Write diagnostic logs to daily-rotated files in DIR
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Pair each follow-up question with its event file.
    pub fn follow_up_turns(&self) -> Result<Vec<(String, PathBuf)>, String> {
        if self.follow_ups.len() != self.follow_up_events.len() {
            return Err(format!(
                "{} --follow-up questions but {} --follow-up-events files",
                self.follow_ups.len(),
                self.follow_up_events.len()
            ));
        }
        Ok(self
            .follow_ups
            .iter()
            .cloned()
            .zip(self.follow_up_events.iter().cloned())
            .collect())
    }

    /// Query of the first turn.
    pub fn first_query(&self) -> String {
        self.query.clone().unwrap_or_else(|| {
            self.events
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Replayed debate".to_string())
        })
    }
}

/// Parse `id[:Display Name[:#rrggbb]]` into a roster entry.
pub fn parse_agent_spec(raw: &str) -> Result<AgentSpec, String> {
    let mut parts = raw.splitn(3, ':');
    let id = AgentId::parse(parts.next().unwrap_or_default().trim())
        .map_err(|e| e.to_string())?;
    let derived = AgentSpec::derived(id.clone(), 0);

    let display_name = match parts.next().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => derived.display_name,
    };
    let color = match parts.next().map(str::trim) {
        Some(color) if is_hex_color(color) => color.to_string(),
        Some(color) => return Err(format!("invalid color {:?}, expected #rrggbb", color)),
        None => derived.color,
    };
    Ok(AgentSpec::new(id, display_name, color))
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal_invocation() {
        let cli = Cli::try_parse_from(["debate-replay", "session.jsonl"]).unwrap();
        assert_eq!(cli.events, PathBuf::from("session.jsonl"));
        assert_eq!(cli.first_query(), "session");
        assert_eq!(cli.output, None);
        assert!(cli.follow_up_turns().unwrap().is_empty());
    }

    #[test]
    fn test_follow_ups_pair_with_event_files() {
        let cli = Cli::try_parse_from([
            "debate-replay",
            "t1.jsonl",
            "--follow-up",
            "Why?",
            "--follow-up-events",
            "t2.jsonl",
        ])
        .unwrap();
        assert_eq!(
            cli.follow_up_turns().unwrap(),
            vec![("Why?".to_string(), PathBuf::from("t2.jsonl"))]
        );

        let unpaired =
            Cli::try_parse_from(["debate-replay", "t1.jsonl", "--follow-up", "Why?"]).unwrap();
        assert!(unpaired.follow_up_turns().is_err());
    }

    #[test]
    fn test_exit_time_travel_requires_jump() {
        assert!(Cli::try_parse_from(["debate-replay", "t.jsonl", "--exit-time-travel"]).is_err());
        let cli = Cli::try_parse_from([
            "debate-replay",
            "t.jsonl",
            "--jump",
            "1",
            "--exit-time-travel",
        ])
        .unwrap();
        assert_eq!(cli.jump, Some(1));
        assert!(cli.exit_time_travel);
    }

    #[test]
    fn test_parse_agent_spec_variants() {
        let full = parse_agent_spec("cfo:Chief Financial Officer:#112233").unwrap();
        assert_eq!(full.id, AgentId::new("cfo"));
        assert_eq!(full.display_name, "Chief Financial Officer");
        assert_eq!(full.color, "#112233");

        let bare = parse_agent_spec("legal-counsel").unwrap();
        assert_eq!(bare.display_name, "Legal Counsel");

        assert!(parse_agent_spec("bad id").is_err());
        assert!(parse_agent_spec("cfo:CFO:blue").is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        let cli = Cli::try_parse_from(["debate-replay", "t.jsonl", "-o", "json"]).unwrap();
        let format: debate_domain::OutputFormat = cli.output.unwrap().into();
        assert_eq!(format, debate_domain::OutputFormat::Json);
    }
}
