//! Conversation ledger: the append-only record of what the user sees.
//!
//! Every entry shares a header (`id`, `type`, `timestamp`) and carries one
//! of three bodies. On the wire the body is flattened next to the header and
//! `type` is the discriminant:
//!
//! ```json
//! {"id":"msg_…","type":"message","timestamp":"…","role":"user","content":"hi"}
//! {"id":"tool_…","type":"tool_call","timestamp":"…","toolCall":{…}}
//! {"id":"card_…","type":"card","timestamp":"…","card":{…}}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub body: ItemBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemBody {
    Message {
        role: MessageRole,
        content: String,
    },
    ToolCall {
        #[serde(rename = "toolCall")]
        tool_call: ToolCallRecord,
    },
    Card {
        card: Card,
    },
}

/// Roles that appear on ledger messages. Tool and system turns never reach
/// the ledger as plain messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallStatus {
    Executing,
    Completed,
    Error,
}

/// Outcome of one model-requested tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Call id assigned by the model
    pub id: String,
    pub name: String,
    pub arguments: Map<String, Value>,
    pub status: ToolCallStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ToolCallRecord {
    pub fn executing(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
            status: ToolCallStatus::Executing,
            result: None,
            error: None,
        }
    }

    /// Settle a running call with its result. Consumes the record so a call
    /// can only settle once.
    pub fn complete(self, result: Value) -> Self {
        Self {
            status: ToolCallStatus::Completed,
            result: Some(result),
            error: None,
            ..self
        }
    }

    pub fn fail(self, error: impl Into<String>) -> Self {
        Self {
            status: ToolCallStatus::Error,
            result: None,
            error: Some(error.into()),
            ..self
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status != ToolCallStatus::Executing
    }
}

/// A UI-renderable artifact produced alongside a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub title: String,
    pub content: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAction {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Tool name for buttons, URL for links
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Button,
    Link,
}

impl Card {
    pub fn new(card_type: impl Into<String>, title: impl Into<String>, content: Map<String, Value>) -> Self {
        let card_type = card_type.into();
        Self {
            id: format!("{}_card_{}", card_type, uuid::Uuid::new_v4().simple()),
            card_type,
            title: title.into(),
            content,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: CardAction) -> Self {
        self.actions.push(action);
        self
    }
}

impl CardAction {
    pub fn button(id: impl Into<String>, label: impl Into<String>, tool: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ActionKind::Button,
            action: tool.into(),
            data: Some(data),
        }
    }

    pub fn link(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ActionKind::Link,
            action: url.into(),
            data: None,
        }
    }
}

impl LedgerItem {
    fn stamped(prefix: &str, body: ItemBody) -> Self {
        Self {
            id: format!("{}_{}", prefix, uuid::Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            body,
        }
    }

    pub fn user_message(content: impl Into<String>) -> Self {
        Self::stamped("msg", ItemBody::Message {
            role: MessageRole::User,
            content: content.into(),
        })
    }

    pub fn assistant_message(content: impl Into<String>) -> Self {
        Self::stamped("msg", ItemBody::Message {
            role: MessageRole::Assistant,
            content: content.into(),
        })
    }

    pub fn tool_call(record: ToolCallRecord) -> Self {
        Self::stamped("tool", ItemBody::ToolCall { tool_call: record })
    }

    pub fn card(card: Card) -> Self {
        Self::stamped("card", ItemBody::Card { card })
    }

    /// The wire discriminant of this item
    pub fn kind(&self) -> &'static str {
        match &self.body {
            ItemBody::Message { .. } => "message",
            ItemBody::ToolCall { .. } => "tool_call",
            ItemBody::Card { .. } => "card",
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCallRecord> {
        match &self.body {
            ItemBody::ToolCall { tool_call } => Some(tool_call),
            _ => None,
        }
    }
}
