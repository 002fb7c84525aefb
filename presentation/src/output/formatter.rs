//! Output formatter trait

use debate_application::DebateView;
use debate_domain::OutputFormat;

/// Trait for formatting debate views
pub trait OutputFormatter {
    /// Format the complete view
    fn format(&self, view: &DebateView) -> String;

    /// Format as JSON
    fn format_json(&self, view: &DebateView) -> String;

    /// Format one line per agent (concise output)
    fn format_summary(&self, view: &DebateView) -> String;

    /// Format in the requested output format
    fn render(&self, view: &DebateView, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(view),
            OutputFormat::Summary => self.format_summary(view),
            OutputFormat::Json => self.format_json(view),
        }
    }
}
