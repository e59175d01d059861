//! Agent host: activates conversation agents from storage, runs one
//! command against them, and writes their state back.
//!
//! Each agent instance is stored as one blob under `agent/<id>`. Commands
//! against the same instance run one at a time; different instances do not
//! block each other.

use std::collections::HashMap;
use std::sync::Arc;
use futures::lock::Mutex;
use newsagent_types::{
    AgentError, Result,
    article::{Article, Person, TopicArticles},
    config::AgentConfig,
};
use crate::agent::{AgentCommand, ChatReply, ConversationAgent, ItemsReply};
use crate::news;
use crate::ports::{LlmPort, QueryPort, StoragePort};
use crate::tools::ToolRegistry;

const KEY_PREFIX: &str = "agent/";

pub struct ConversationHost {
    storage: Arc<dyn StoragePort>,
    llm: Arc<dyn LlmPort>,
    graph: Arc<dyn QueryPort>,
    config: Arc<AgentConfig>,
    tools: Arc<ToolRegistry>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ConversationHost {
    pub fn new(
        config: AgentConfig,
        storage: Arc<dyn StoragePort>,
        llm: Arc<dyn LlmPort>,
        graph: Arc<dyn QueryPort>,
    ) -> Self {
        log::info!(
            "{} host using {} storage, model {}",
            ConversationAgent::NAME,
            storage.backend_name(),
            config.llm.model
        );
        Self {
            storage,
            llm,
            graph,
            config: Arc::new(config),
            tools: Arc::new(ToolRegistry::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the default news tool catalogue.
    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = Arc::new(tools);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn key(id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    async fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Create a fresh agent instance and return its id.
    pub async fn start(&self) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let agent = ConversationAgent::new(self.config.clone(), self.tools.clone());
        let blob = agent
            .snapshot()
            .ok_or_else(|| AgentError::Serialization("could not encode a new conversation".to_string()))?;
        self.storage.set(&Self::key(&id), &blob).await?;
        log::info!("Started agent {}", id);
        Ok(id)
    }

    /// Deliver a named command to an instance and return its JSON reply.
    ///
    /// State is written back only when the command succeeds and changes it.
    pub async fn send_message(&self, id: &str, name: &str, data: Option<&str>) -> Result<Option<String>> {
        let command = AgentCommand::parse(name, data)?;
        let key = Self::key(id);
        if !self.storage.exists(&key).await? {
            return Err(AgentError::AgentNotFound(id.to_string()));
        }

        let lock = self.lock_for(id).await;
        let guard = lock.lock().await;
        let Some(blob) = self.storage.get(&key).await? else {
            // stopped while we waited
            drop(guard);
            self.locks.lock().await.remove(id);
            return Err(AgentError::AgentNotFound(id.to_string()));
        };

        let mut agent = ConversationAgent::restore(self.config.clone(), self.tools.clone(), Some(&blob));
        let mutating = command.is_mutating();
        log::debug!("Agent {} <- {}", id, command.name());
        let reply = agent.execute(command, &*self.llm, &*self.graph).await?;

        if mutating {
            match agent.snapshot() {
                Some(next) => self.storage.set(&key, &next).await?,
                None => log::warn!("Agent {} keeps its previous state", id),
            }
        }
        drop(guard);
        Ok(reply)
    }

    /// Destroy an instance and its state.
    pub async fn stop(&self, id: &str) -> Result<String> {
        let key = Self::key(id);
        if !self.storage.exists(&key).await? {
            return Err(AgentError::AgentNotFound(id.to_string()));
        }
        let lock = self.lock_for(id).await;
        let found = {
            let _guard = lock.lock().await;
            let found = self.storage.exists(&key).await?;
            if found {
                self.storage.delete(&key).await?;
            }
            found
        };
        self.locks.lock().await.remove(id);
        if !found {
            return Err(AgentError::AgentNotFound(id.to_string()));
        }
        log::info!("Stopped agent {}", id);
        Ok(id.to_string())
    }

    /// Ids of all stored instances
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self
            .storage
            .list_keys(KEY_PREFIX)
            .await?
            .into_iter()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    #[cfg(test)]
    pub(crate) async fn tracked_locks(&self) -> usize {
        self.locks.lock().await.len()
    }

    // ─── Typed conveniences ──────────────────────────────────

    pub async fn create_conversation(&self) -> Result<String> {
        self.start().await
    }

    pub async fn continue_chat(&self, id: &str, query: &str) -> Result<ChatReply> {
        let data = serde_json::json!({ "message": query }).to_string();
        let reply = self
            .send_message(id, "chat", Some(&data))
            .await?
            .ok_or_else(|| AgentError::InvalidRequest("no response received".to_string()))?;
        Ok(serde_json::from_str(&reply)?)
    }

    pub async fn chat_history(&self, id: &str) -> Result<ItemsReply> {
        match self.send_message(id, "get_items", None).await? {
            Some(reply) => Ok(serde_json::from_str(&reply)?),
            None => Ok(ItemsReply::empty()),
        }
    }

    pub async fn delete_conversation_history(&self, id: &str) -> Result<bool> {
        self.send_message(id, "clear_items", None).await?;
        Ok(true)
    }

    pub async fn delete_agent(&self, id: &str) -> Result<String> {
        self.stop(id).await
    }

    // ─── News queries ────────────────────────────────────────

    pub async fn query_articles(&self, num: usize) -> Result<Vec<Article>> {
        news::latest_articles(&*self.graph, num).await
    }

    pub async fn query_topics(&self, topic: &str) -> Result<Vec<TopicArticles>> {
        news::topics_by_name(&*self.graph, topic).await
    }

    pub async fn query_people(&self) -> Result<Vec<Person>> {
        news::people(&*self.graph).await
    }
}
