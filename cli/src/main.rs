//! CLI entrypoint for Debate Replay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{DebateEngine, ReplayDebateInput, ReplayDebateUseCase, ReplayStats};
use debate_domain::OutputFormat;
use debate_infrastructure::{
    ConfigLoader, FileConfig, JsonlEventRecorder, JsonlEventSource, RandomThroughput,
};
use debate_presentation::{Cli, ConsoleFormatter, LiveReporter, OutputFormatter};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);

    let _log_guard = init_logging(cli.verbose, config.log.dir.as_deref());
    info!("Starting Debate Replay");

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("Config: {}", issue);
        }
        bail!("Invalid configuration ({} issues)", issues.len());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let follow_ups = cli.follow_up_turns().map_err(anyhow::Error::msg)?;
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let mut engine = DebateEngine::new(config.engine_config());

    if config.replay.simulate_throughput {
        let [min, max] = config.replay.simulation_range;
        let simulator = match config.replay.simulation_seed {
            Some(seed) => RandomThroughput::seeded(min, max, seed),
            None => RandomThroughput::new(min, max),
        };
        engine = engine.with_simulator(Box::new(simulator));
    }

    if let Some(path) = &config.log.events_path {
        match JsonlEventRecorder::new(path) {
            Some(recorder) => {
                info!("Recording events to {}", recorder.path().display());
                engine = engine.with_recorder(Arc::new(recorder));
            }
            None => warn!("Event recording disabled"),
        }
    }

    let cancel = CancellationToken::new();
    let reporter = config
        .output
        .live
        .then(|| LiveReporter::new().spawn(engine.subscribe(), cancel.clone()));

    // === Replay ===
    let mut input = ReplayDebateInput::default();
    if let Some(period) = config.simulation_interval() {
        input = input.with_tick_interval(period);
    }

    engine.start_debate(cli.first_query(), cli.agents.clone());
    replay_file(&mut engine, &cli.events, config.replay.speed, input.clone()).await?;

    for (question, events) in follow_ups {
        let node = engine.follow_up(question);
        info!("{} leads into turn {}", node.id, node.turn_index);
        replay_file(&mut engine, &events, config.replay.speed, input.clone()).await?;
    }

    if let Some(index) = cli.jump {
        if !engine.jump_to_checkpoint(index) {
            warn!(
                "No checkpoint at index {} ({} available)",
                index,
                engine.view().checkpoints.len()
            );
        }
        if cli.exit_time_travel {
            engine.exit_time_travel();
        }
    }

    cancel.cancel();
    if let Some(handle) = reporter {
        let _ = handle.await;
    }

    // Output results
    println!("{}", ConsoleFormatter.render(&engine.view(), format));

    Ok(())
}

/// Command-line flags win over every configuration source.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(speed) = cli.speed {
        config.replay.speed = speed;
    }
    if cli.simulate_throughput {
        config.replay.simulate_throughput = true;
    }
    if cli.no_color {
        config.output.color = false;
    }
    if cli.quiet {
        config.output.live = false;
    }
    if let Some(dir) = &cli.log_dir {
        config.log.dir = Some(dir.clone());
    }
    if let Some(path) = &cli.record {
        config.log.events_path = Some(path.clone());
    }
}

/// Initialize logging based on verbosity level.
///
/// Without `-v`, `RUST_LOG` is honored. With a log directory, output goes
/// to a daily-rotated file instead of stderr; the returned guard flushes it.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "debate-replay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

async fn replay_file(
    engine: &mut DebateEngine,
    path: &Path,
    speed: f64,
    input: ReplayDebateInput,
) -> Result<ReplayStats> {
    let source = JsonlEventSource::open(path)
        .await
        .with_context(|| format!("Cannot replay {}", path.display()))?
        .with_speed(speed);

    let stats = ReplayDebateUseCase::new(engine).execute(source, input).await;
    if !stats.reached_end {
        warn!("{} ended without a debate_end event", path.display());
    }
    if stats.rejected > 0 {
        warn!("{}: {} events rejected", path.display(), stats.rejected);
    }
    Ok(stats)
}
