//! Custom error types for OR-AF
//!
//! One error enum shared by agents, the orchestrator, config and the CLI.

use thiserror::Error;

/// Main error type for OR-AF operations
#[derive(Error, Debug)]
pub enum OrafError {
    /// An agent was dispatched whose `execute` was never overridden
    #[error("Agent '{agent}' does not implement execute")]
    Unimplemented { agent: String },

    /// A value that is not an agent handle was offered for registration
    #[error("Only agents can be registered, got value of type `{found}`")]
    TypeMismatch { found: String },

    /// No registered agent matches the requested name
    #[error("Agent '{0}' not found")]
    AgentNotFound(String),

    /// Task parameters did not match what the agent expects
    #[error("Invalid parameters for '{agent}:{task}': {reason}")]
    InvalidParams {
        agent: String,
        task: String,
        reason: String,
    },

    /// Failure reported by an agent while running a task
    #[error("Agent '{agent}' failed on task '{task}': {message}")]
    Execution {
        agent: String,
        task: String,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for OR-AF operations
pub type Result<T> = std::result::Result<T, OrafError>;

impl OrafError {
    /// Create an unimplemented error for the named agent
    pub fn unimplemented(agent: impl Into<String>) -> Self {
        Self::Unimplemented {
            agent: agent.into(),
        }
    }

    /// Create a type mismatch error naming the offending type
    pub fn type_mismatch(found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            found: found.into(),
        }
    }

    /// Create an invalid-parameters error
    pub fn invalid_params(
        agent: impl Into<String>,
        task: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParams {
            agent: agent.into(),
            task: task.into(),
            reason: reason.into(),
        }
    }

    /// Create an execution error
    pub fn execution(
        agent: impl Into<String>,
        task: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Execution {
            agent: agent.into(),
            task: task.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
