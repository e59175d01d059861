//! Conversation agent: the named-command surface over one conversation.
//!
//! The host restores an agent from its state blob, sends it one command, and
//! snapshots it again. Commands are:
//!
//! | name          | payload             | reply                           |
//! |---------------|---------------------|---------------------------------|
//! | `chat`        | `{"message": "…"}`  | `{"items": […], "conversationId": "…"}` |
//! | `get_items`   | -                   | `{"items": […], "count": n}`    |
//! | `clear_items` | -                   | -                               |

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use newsagent_types::{
    AgentError, Result,
    config::AgentConfig,
    item::LedgerItem,
    message::Message,
    state::ConversationState,
};
use crate::ports::{LlmPort, QueryPort};
use crate::runtime::TurnRunner;
use crate::state::{load_state, save_state};
use crate::tools::ToolRegistry;

#[derive(Debug, Clone, PartialEq)]
pub enum AgentCommand {
    Chat { message: String },
    GetItems,
    ClearItems,
}

#[derive(Deserialize)]
struct ChatPayload {
    message: String,
}

impl AgentCommand {
    pub fn parse(name: &str, data: Option<&str>) -> Result<Self> {
        match name {
            "chat" => {
                let raw = data
                    .ok_or_else(|| AgentError::InvalidRequest("no message data provided".to_string()))?;
                let payload: ChatPayload = serde_json::from_str(raw).map_err(|e| {
                    AgentError::InvalidRequest(format!("failed to parse chat request: {}", e))
                })?;
                if payload.message.trim().is_empty() {
                    return Err(AgentError::InvalidRequest("message is empty".to_string()));
                }
                Ok(AgentCommand::Chat { message: payload.message })
            }
            "get_items" => Ok(AgentCommand::GetItems),
            "clear_items" => Ok(AgentCommand::ClearItems),
            other => Err(AgentError::UnknownMessageType(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AgentCommand::Chat { .. } => "chat",
            AgentCommand::GetItems => "get_items",
            AgentCommand::ClearItems => "clear_items",
        }
    }

    /// Whether the command changes state that must be written back
    pub fn is_mutating(&self) -> bool {
        !matches!(self, AgentCommand::GetItems)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub items: Vec<LedgerItem>,
    pub conversation_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsReply {
    pub items: Vec<LedgerItem>,
    pub count: usize,
}

impl ItemsReply {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }
}

pub struct ConversationAgent {
    state: ConversationState,
    config: Arc<AgentConfig>,
    tools: Arc<ToolRegistry>,
}

impl ConversationAgent {
    pub const NAME: &'static str = "NewsChatAgent";

    pub fn new(config: Arc<AgentConfig>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            state: ConversationState::new(),
            config,
            tools,
        }
    }

    /// Rebuild an agent from a persisted blob; see [`load_state`].
    pub fn restore(config: Arc<AgentConfig>, tools: Arc<ToolRegistry>, blob: Option<&[u8]>) -> Self {
        Self {
            state: load_state(blob),
            config,
            tools,
        }
    }

    /// Persistable form of the current state; see [`save_state`].
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        save_state(&self.state)
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Run a named command with an optional JSON payload and return the
    /// JSON reply, if the command has one.
    pub async fn handle(
        &mut self,
        name: &str,
        data: Option<&str>,
        llm: &dyn LlmPort,
        graph: &dyn QueryPort,
    ) -> Result<Option<String>> {
        let command = AgentCommand::parse(name, data)?;
        self.execute(command, llm, graph).await
    }

    pub async fn execute(
        &mut self,
        command: AgentCommand,
        llm: &dyn LlmPort,
        graph: &dyn QueryPort,
    ) -> Result<Option<String>> {
        match command {
            AgentCommand::Chat { message } => {
                let reply = self.chat(&message, llm, graph).await?;
                Ok(Some(serde_json::to_string(&reply)?))
            }
            AgentCommand::GetItems => Ok(Some(serde_json::to_string(&self.get_items())?)),
            AgentCommand::ClearItems => {
                self.clear_items();
                Ok(None)
            }
        }
    }

    /// One user turn. On error the agent's state is left exactly as it was.
    ///
    /// The reply carries the items this turn produced after the user's own
    /// message: cards, tool calls, and the assistant answer when non-empty.
    pub async fn chat(
        &mut self,
        message: &str,
        llm: &dyn LlmPort,
        graph: &dyn QueryPort,
    ) -> Result<ChatReply> {
        let mut next = self.state.clone();
        let conversation_id = next.ensure_conversation_id().to_string();
        next.push_item(LedgerItem::user_message(message));
        next.push_history(Message::user(message));

        let runner = TurnRunner::new(&self.config, &self.tools);
        let outcome = runner.run(&next.chat_history, llm, graph).await.map_err(|e| {
            log::warn!("Turn failed for {}: {}", conversation_id, e);
            e
        })?;

        let mut created = outcome.items;
        if !outcome.answer.is_empty() {
            created.push(LedgerItem::assistant_message(&outcome.answer));
        }
        for item in &created {
            next.push_item(item.clone());
        }

        next.replace_history(outcome.history);
        next.trim_history(self.config.tool_loop.max_history);

        log::info!(
            "Conversation {}: {} round(s), {} new item(s){}",
            conversation_id,
            outcome.rounds,
            created.len(),
            if outcome.exhausted { ", fallback answer" } else { "" }
        );

        self.state = next;
        Ok(ChatReply {
            items: created,
            conversation_id,
        })
    }

    pub fn get_items(&self) -> ItemsReply {
        ItemsReply {
            items: self.state.items.clone(),
            count: self.state.items.len(),
        }
    }

    pub fn clear_items(&mut self) {
        self.state.clear();
    }
}
