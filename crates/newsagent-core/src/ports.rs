//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `newsagent-core` (pure Rust).
//! Implementations live in `newsagent-platform` (HTTP and disk adapters).
//! The core never imports platform code; it only depends on these traits.

use std::collections::BTreeMap;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use newsagent_types::{
    Result,
    message::Message,
    tool::ToolDefinition,
};

// ─── LLM Port ────────────────────────────────────────────────

/// How the model may use the tools it is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Auto,
    None,
}

/// Request to send to an LLM
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    pub tool_choice: ToolChoice,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Complete (non-streaming) response from an LLM
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub message: Message,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LlmPort: Send + Sync {
    /// Non-streaming chat completion
    async fn chat_completion(&self, req: ChatRequest) -> Result<ChatResponse>;
}

// ─── Graph Query Port ────────────────────────────────────────

/// A parameterised read query against the news graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQuery {
    pub query: String,
    /// Variable values are strings on the wire, whatever their declared type
    pub variables: BTreeMap<String, String>,
}

impl GraphQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_variable(mut self, name: &str, value: impl ToString) -> Self {
        self.variables.insert(name.to_string(), value.to_string());
        self
    }
}

#[async_trait]
pub trait QueryPort: Send + Sync {
    /// Run a read-only query and return its `data` object
    async fn execute(&self, query: GraphQuery) -> Result<Value>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
