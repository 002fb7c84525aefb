//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished debate is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every agent's text, checkpoints and turn history
    Full,
    /// One line per agent plus totals (default)
    #[default]
    Summary,
    /// The view as JSON
    Json,
}
