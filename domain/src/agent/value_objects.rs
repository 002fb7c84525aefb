//! Agent value objects - immutable types describing debate participants.
//!
//! # Identifiers
//! - [`AgentId`] - Stable identifier of an agent, unique within a debate
//!
//! # Roster
//! - [`AgentSpec`] - Presentation metadata fixed when a record is created
//!
//! # Usage
//! - [`AgentMetrics`] - Authoritative usage figures reported by the backend

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Longest identifier accepted by [`AgentId::parse`].
pub const MAX_AGENT_ID_LEN: usize = 64;

/// Colors handed out to agents that join without explicit presentation metadata.
pub const AGENT_PALETTE: [&str; 8] = [
    "#4f8cff", "#ff7a59", "#2ec4b6", "#f7b32b", "#9b5de5", "#ef476f", "#06d6a0", "#8d99ae",
];

/// Unique identifier for an agent within a debate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId without validation (trusted roster input).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an AgentId, rejecting empty, oversized or whitespace-bearing ids.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = Self(id.into());
        id.validate()?;
        Ok(id)
    }

    /// Checks the id against the registry rules.
    pub fn validate(&self) -> Result<(), DomainError> {
        let s = self.0.as_str();
        if s.is_empty()
            || s.len() > MAX_AGENT_ID_LEN
            || s.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(DomainError::InvalidAgentId(self.0.clone()));
        }
        Ok(())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Roster entry: who participates and how they are presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub id: AgentId,
    pub display_name: String,
    pub color: String,
}

impl AgentSpec {
    pub fn new(
        id: impl Into<AgentId>,
        display_name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            color: color.into(),
        }
    }

    /// Derives presentation metadata for an agent that appeared without any.
    ///
    /// `market-analyst` becomes "Market Analyst"; the color cycles through
    /// [`AGENT_PALETTE`] by roster position.
    pub fn derived(id: AgentId, position: usize) -> Self {
        let display_name = id
            .as_str()
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let display_name = if display_name.is_empty() {
            id.to_string()
        } else {
            display_name
        };

        Self {
            id,
            display_name,
            color: AGENT_PALETTE[position % AGENT_PALETTE.len()].to_string(),
        }
    }
}

/// Usage figures reported once per stream by the backend.
///
/// These supersede the throughput the engine estimates from token arrivals.
/// `completion_time` is in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentMetrics {
    #[serde(alias = "tokensPerSecond")]
    pub tokens_per_second: f64,
    #[serde(alias = "totalTokens")]
    pub total_tokens: u64,
    #[serde(alias = "promptTokens")]
    pub prompt_tokens: u64,
    #[serde(alias = "completionTokens")]
    pub completion_tokens: u64,
    #[serde(alias = "completionTime")]
    pub completion_time: f64,
}

impl AgentMetrics {
    /// Rejects negative or non-finite rates and durations.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.tokens_per_second.is_finite() || self.tokens_per_second < 0.0 {
            return Err(DomainError::InvalidMetrics(format!(
                "tokens_per_second must be a non-negative number, got {}",
                self.tokens_per_second
            )));
        }
        if !self.completion_time.is_finite() || self.completion_time < 0.0 {
            return Err(DomainError::InvalidMetrics(format!(
                "completion_time must be a non-negative number, got {}",
                self.completion_time
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_parse_accepts_slugs() {
        let id = AgentId::parse("risk-analyst_2").unwrap();
        assert_eq!(id.as_str(), "risk-analyst_2");
    }

    #[test]
    fn test_agent_id_parse_rejects_malformed() {
        assert!(AgentId::parse("").is_err());
        assert!(AgentId::parse("two words").is_err());
        assert!(AgentId::parse("tab\there").is_err());
        assert!(AgentId::parse("x".repeat(MAX_AGENT_ID_LEN + 1)).is_err());
        assert!(AgentId::parse("x".repeat(MAX_AGENT_ID_LEN)).is_ok());
    }

    #[test]
    fn test_agent_id_serializes_as_plain_string() {
        let id = AgentId::new("cfo");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cfo\"");
    }

    #[test]
    fn test_derived_spec_title_cases_id() {
        let spec = AgentSpec::derived(AgentId::new("market-analyst"), 0);
        assert_eq!(spec.display_name, "Market Analyst");
        assert_eq!(spec.color, AGENT_PALETTE[0]);

        let spec = AgentSpec::derived(AgentId::new("legal_counsel"), 9);
        assert_eq!(spec.display_name, "Legal Counsel");
        assert_eq!(spec.color, AGENT_PALETTE[1]);
    }

    #[test]
    fn test_derived_spec_falls_back_to_raw_id() {
        let spec = AgentSpec::derived(AgentId::new("--"), 0);
        assert_eq!(spec.display_name, "--");
    }

    #[test]
    fn test_metrics_accept_camel_case_payload() {
        let metrics: AgentMetrics = serde_json::from_str(
            r#"{"tokensPerSecond": 42.5, "totalTokens": 300, "promptTokens": 100,
                "completionTokens": 200, "completionTime": 4.0}"#,
        )
        .unwrap();
        assert_eq!(metrics.completion_tokens, 200);
        assert_eq!(metrics.completion_time, 4.0);
        assert!(metrics.validate().is_ok());
    }

    #[test]
    fn test_metrics_validate_rejects_negative_time() {
        let metrics = AgentMetrics {
            completion_time: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            metrics.validate(),
            Err(DomainError::InvalidMetrics(_))
        ));

        let metrics = AgentMetrics {
            tokens_per_second: f64::NAN,
            ..Default::default()
        };
        assert!(metrics.validate().is_err());
    }
}
