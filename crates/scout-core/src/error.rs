//! Error Types

use thiserror::Error;

/// Result type alias for agent and tool operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// No tool registered under this name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments do not satisfy the tool's declared parameters
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// A tool looked up something that does not exist
    #[error("{0}")]
    NotFound(String),

    /// Tool ran and failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Reasoning loop gave up
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Errors that indicate a caller mistake rather than a backend failure
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound(_) | Self::ToolValidation(_) | Self::NotFound(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            Self::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            Self::ToolValidation(msg) => format!("Invalid tool input: {msg}"),
            Self::NotFound(msg) => msg.clone(),
            Self::ToolExecution(msg) => format!("Tool error: {msg}"),
            Self::MaxIterations(_) => {
                "The request took too long to process. Please try a simpler query.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}
