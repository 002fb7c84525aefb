//! Per-agent failure taxonomy.
//!
//! A failed agent stops streaming but keeps its partial text; the
//! [`ErrorCategory`] tag lets a renderer decide how to present the failure
//! (retry hint for rate limits, connectivity hint for network errors, ...).

use serde::{Deserialize, Serialize};

/// Category of an agent failure, derived from the backend's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The agent did not finish in time
    Timeout,
    /// The model provider throttled the request
    RateLimited,
    /// Connection dropped or could not be established
    Network,
    /// The provider or backend returned an error
    Provider,
    /// The stream was cancelled upstream
    Cancelled,
    /// Anything that doesn't match a known pattern
    Unknown,
}

impl ErrorCategory {
    /// Classify a free-form error message.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has(&["timeout", "timed out", "deadline"]) {
            ErrorCategory::Timeout
        } else if has(&["rate limit", "rate-limit", "429", "too many requests", "quota"]) {
            ErrorCategory::RateLimited
        } else if has(&["cancel", "aborted"]) {
            ErrorCategory::Cancelled
        } else if has(&["connection", "network", "socket", "dns", "unreachable", "reset by peer"]) {
            ErrorCategory::Network
        } else if has(&["provider", "model", "500", "502", "503", "internal server", "overloaded"]) {
            ErrorCategory::Provider
        } else {
            ErrorCategory::Unknown
        }
    }

    /// Whether re-running the agent has a reasonable chance to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Timeout | ErrorCategory::RateLimited | ErrorCategory::Network
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Network => "network",
            ErrorCategory::Provider => "provider",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failure surfaced on one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFailure {
    pub category: ErrorCategory,
    pub message: String,
}

impl AgentFailure {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            category: ErrorCategory::classify(&message),
            message,
        }
    }
}

impl std::fmt::Display for AgentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}
