use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::item::LedgerItem;
use crate::message::{Message, Role};

/// Everything a conversation remembers between commands.
///
/// Mutators refresh `last_activity`; the fields are public for reading and
/// for tests, but code that changes a conversation should go through the
/// methods so the timestamp stays honest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    /// Empty until the first chat turn assigns one
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub items: Vec<LedgerItem>,
    #[serde(default)]
    pub chat_history: Vec<Message>,
    pub last_activity: DateTime<Utc>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            conversation_id: String::new(),
            items: Vec::new(),
            chat_history: Vec::new(),
            last_activity: Utc::now(),
        }
    }

    /// Assign a conversation id if none exists yet and return it.
    pub fn ensure_conversation_id(&mut self) -> &str {
        if self.conversation_id.is_empty() {
            self.conversation_id = format!("conv_{}", uuid::Uuid::new_v4().simple());
            self.touch();
        }
        &self.conversation_id
    }

    pub fn push_item(&mut self, item: LedgerItem) {
        self.items.push(item);
        self.touch();
    }

    pub fn push_history(&mut self, message: Message) {
        self.chat_history.push(message);
        self.touch();
    }

    pub fn replace_history(&mut self, history: Vec<Message>) {
        self.chat_history = history;
        self.touch();
    }

    /// Drop the oldest working-context entries until at most `max` remain.
    ///
    /// The kept window never opens on a tool result, since the assistant
    /// entry that requested it is gone.
    pub fn trim_history(&mut self, max: usize) {
        let len = self.chat_history.len();
        if len <= max {
            return;
        }
        let mut start = len - max;
        while start < len && self.chat_history[start].role == Role::Tool {
            start += 1;
        }
        self.chat_history.drain(..start);
        self.touch();
    }

    /// Empty the ledger and working context. The conversation id survives.
    pub fn clear(&mut self) {
        self.items.clear();
        self.chat_history.clear();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
