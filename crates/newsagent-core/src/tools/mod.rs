//! Tool registry and dispatcher.
//!
//! Tools follow the OpenAI function-calling schema so they work across providers.
//! Each tool is a [`ToolHandler`]: it declares its schema and runs against the
//! collaborators in a [`ToolContext`]. Handlers may drop [`Card`]s into the
//! context as a human-facing projection of their result; the loop decides
//! where those cards land.

mod articles;
mod summarize;
mod topics;

use std::collections::BTreeMap;
use async_trait::async_trait;
use serde_json::{Map, Value};
use newsagent_types::{
    AgentError, Result,
    config::LlmConfig,
    item::Card,
    tool::ToolDefinition,
};
use crate::ports::{LlmPort, QueryPort};

pub use articles::{GetArticleById, GetArticlesByLocation, GetArticlesByOrganization, SearchArticles};
pub use summarize::SummarizeArticle;
pub use topics::AnalyzeTopics;

/// Key that holds the raw argument string when it is not a JSON object
pub const RAW_ARGS_KEY: &str = "raw";

#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value>;
}

/// Collaborators a tool may use while it runs, plus the cards it produced.
pub struct ToolContext<'a> {
    pub graph: &'a dyn QueryPort,
    pub llm: &'a dyn LlmPort,
    pub llm_config: &'a LlmConfig,
    cards: Vec<Card>,
}

impl<'a> ToolContext<'a> {
    pub fn new(graph: &'a dyn QueryPort, llm: &'a dyn LlmPort, llm_config: &'a LlmConfig) -> Self {
        Self {
            graph,
            llm,
            llm_config,
            cards: Vec::new(),
        }
    }

    pub fn emit_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Hand over the cards emitted since the last call.
    pub fn take_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

/// Registry of available tools
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Registry with the news tools installed
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtins();
        registry
    }

    pub fn empty() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, handler: impl ToolHandler + 'static) {
        let name = handler.definition().name;
        if self.tools.insert(name.clone(), Box::new(handler)).is_some() {
            log::warn!("Tool {} registered twice, keeping the latest", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<ToolDefinition> {
        self.tools.get(name).map(|t| t.definition())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool. Unknown names fail without touching `ctx`.
    pub async fn dispatch(&self, name: &str, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let handler = self
            .tools
            .get(name)
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;
        log::debug!("Dispatching {} with {} argument(s)", name, args.as_map().len());
        handler.call(args, ctx).await
    }

    fn register_builtins(&mut self) {
        self.register(SearchArticles);
        self.register(GetArticleById);
        self.register(AnalyzeTopics);
        self.register(GetArticlesByLocation);
        self.register(GetArticlesByOrganization);
        self.register(SummarizeArticle);
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort decoding of a model's argument string.
///
/// Anything that is not a JSON object is kept verbatim under [`RAW_ARGS_KEY`].
pub fn parse_tool_args(args: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(args) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = Map::new();
            map.insert(RAW_ARGS_KEY.to_string(), Value::String(args.to_string()));
            map
        }
    }
}

/// Schema-free tool arguments with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    pub fn parse(raw: &str) -> Self {
        Self {
            values: parse_tool_args(raw),
        }
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn str_or(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Integers, floats (truncated) and numeric strings are accepted.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(default),
            _ => default,
        }
    }

    /// A non-blank string argument, or a validation error naming the tool.
    pub fn require_str(&self, tool: &str, key: &str) -> Result<String> {
        let value = self.str_or(key, "");
        if value.trim().is_empty() {
            return Err(AgentError::invalid_argument(tool, format!("{} is required", key)));
        }
        Ok(value)
    }
}

/// Unwrap a `json!` object literal into a map.
fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
