use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("{tool}: {message}")]
    InvalidArgument { tool: String, message: String },

    /// A tool's own collaborator call failed
    #[error("{tool}: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),
}

impl AgentError {
    /// Errors a tool call records on its own ledger item instead of
    /// aborting the turn.
    pub fn is_tool_local(&self) -> bool {
        matches!(
            self,
            AgentError::UnknownTool(_)
                | AgentError::InvalidArgument { .. }
                | AgentError::ToolFailed { .. }
                | AgentError::NotFound(_)
                | AgentError::Query(_)
                | AgentError::Serialization(_)
        )
    }

    pub fn invalid_argument(tool: impl Into<String>, message: impl Into<String>) -> Self {
        AgentError::InvalidArgument {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        AgentError::Serialization(e.to_string())
    }
}
