//! Error Types for Market Scout

use scout_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

#[derive(Error, Debug)]
pub enum ScoutError {
    /// Resolved identifier absent from the remote price map
    #[error("Token {0} not found")]
    NotFound(String),

    /// A remote service answered with something we cannot use
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A record failed validation at a workflow step boundary
    #[error("Schema violation after step '{step}': {reason}")]
    Schema { step: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ScoutError {
    pub fn schema(step: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            step: step.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code for API responses
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "TOKEN_NOT_FOUND",
            Self::Upstream(_) | Self::Network(_) | Self::Serialization(_) => "UPSTREAM_ERROR",
            Self::Schema { .. } => "SCHEMA_VIOLATION",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Agent(_) => "AGENT_ERROR",
        }
    }
}

/// Lets tool adapters use `?` on fetcher results
impl From<ScoutError> for AgentError {
    fn from(err: ScoutError) -> Self {
        match err {
            ScoutError::Agent(inner) => inner,
            ScoutError::NotFound(_) => Self::NotFound(err.to_string()),
            ScoutError::Schema { .. } => Self::ToolValidation(err.to_string()),
            ScoutError::Config(msg) => Self::Config(msg),
            other => Self::ToolExecution(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_symbol() {
        let err = ScoutError::NotFound("FAKE".into());
        assert_eq!(err.to_string(), "Token FAKE not found");
        assert_eq!(err.code(), "TOKEN_NOT_FOUND");
    }

    #[test]
    fn converts_into_tool_errors() {
        let err: AgentError = ScoutError::NotFound("FAKE".into()).into();
        assert!(matches!(err, AgentError::NotFound(msg) if msg == "Token FAKE not found"));

        let err: AgentError = ScoutError::Upstream("HTTP 500".into()).into();
        assert!(matches!(err, AgentError::ToolExecution(_)));

        let err: AgentError = ScoutError::schema("compile-strategy", "blank message").into();
        assert!(matches!(err, AgentError::ToolValidation(_)));

        let err: AgentError = ScoutError::Agent(AgentError::ToolNotFound("x".into())).into();
        assert!(matches!(err, AgentError::ToolNotFound(_)));
    }
}
