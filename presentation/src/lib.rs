//! Presentation layer for debate-replay
//!
//! This crate contains the CLI definition, output formatters for the
//! final debate view and the live progress reporter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat, parse_agent_spec};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::LiveReporter;
