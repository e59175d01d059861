use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Top-level agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub llm: LlmConfig,
    pub tool_loop: LoopConfig,
    pub graph: GraphConfig,
    pub storage: StorageConfig,
    pub system_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            tool_loop: LoopConfig::default(),
            graph: GraphConfig::default(),
            storage: StorageConfig::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl AgentConfig {
    /// The system prompt with `{today}` filled in.
    pub fn render_system_prompt(&self, now: DateTime<Utc>) -> String {
        self.system_prompt
            .replace("{today}", &now.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    /// Used for conversational rounds
    pub temperature: f32,
    /// Used by the summarizer tool
    pub summary_temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: 4096,
            temperature: 0.7,
            summary_temperature: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    OpenAI,
    Ollama,
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::Ollama => "http://localhost:11434",
            LlmProvider::Custom => "",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Ollama => "Ollama",
            LlmProvider::Custom => "Custom",
        }
    }
}

/// Bounds for the tool-calling loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Model rounds per turn before giving up on a final answer
    pub max_rounds: usize,
    /// Working-context entries kept between turns
    pub max_history: usize,
    /// Answer returned when `max_rounds` runs out
    pub fallback_answer: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            max_history: 20,
            fallback_answer: "I've processed your request with the available tools.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            access_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Directory for the file backend
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            path: ".newsagent/conversations".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// File if the directory is usable, memory otherwise
    Auto,
    Memory,
    File,
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"Today is {today}. You are a news assistant, an AI helper for exploring and analyzing news content.

You have access to a news database with articles, topics, organizations, people, and locations.

You can help users:
- Search for specific news articles
- Analyze trending topics and themes
- Find articles by location or organization
- Provide summaries and analysis
- Answer questions about current events

When users ask about news, use the appropriate tools to search the database and provide accurate information.
Be helpful, informative, and focus on providing valuable insights about the news content.
"#;
