//! Composition root: builds the platform adapters and hands them to the
//! conversation host, then runs host operations for the CLI.

use std::io::Write;
use std::sync::Arc;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use newsagent_core::host::ConversationHost;
use newsagent_platform::{open_storage, DgraphExecutor, OpenAiCompatProvider};
use newsagent_types::config::AgentConfig;

use crate::render::{render_articles, render_items, render_people, render_topics};

pub struct App {
    host: ConversationHost,
}

impl App {
    pub async fn new(config: AgentConfig) -> Result<Self> {
        let storage = open_storage(&config.storage).await?;
        if storage.backend_name() == "memory" {
            log::warn!("Conversations are kept in memory and end with this process");
        }
        let llm = Arc::new(OpenAiCompatProvider::new(config.llm.clone())?);
        let graph = Arc::new(DgraphExecutor::new(&config.graph)?);
        log::info!(
            "Model {} via {}, graph at {}",
            config.llm.model,
            llm.base_url(),
            graph.query_url()
        );

        Ok(Self {
            host: ConversationHost::new(config, storage, llm, graph),
        })
    }

    pub async fn new_conversation(&self) -> Result<()> {
        let id = self.host.create_conversation().await?;
        println!("{}", id);
        Ok(())
    }

    pub async fn chat(&self, id: &str, message: &str) -> Result<()> {
        let reply = self.host.continue_chat(id, message).await?;
        println!("{}", render_items(&reply.items));
        Ok(())
    }

    pub async fn history(&self, id: &str) -> Result<()> {
        let history = self.host.chat_history(id).await?;
        if history.count == 0 {
            println!("(no items)");
        } else {
            println!("{}", render_items(&history.items));
        }
        Ok(())
    }

    pub async fn clear(&self, id: &str) -> Result<()> {
        self.host.delete_conversation_history(id).await?;
        println!("Cleared {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = self.host.delete_agent(id).await?;
        println!("Deleted {}", id);
        Ok(())
    }

    pub async fn list(&self) -> Result<()> {
        for id in self.host.list().await? {
            println!("{}", id);
        }
        Ok(())
    }

    pub async fn articles(&self, limit: usize) -> Result<()> {
        let articles = self.host.query_articles(limit).await?;
        if articles.is_empty() {
            println!("(no articles)");
        } else {
            println!("{}", render_articles(&articles));
        }
        Ok(())
    }

    pub async fn topics(&self, topic: &str) -> Result<()> {
        let topics = self.host.query_topics(topic).await?;
        if topics.is_empty() {
            println!("No topics match \"{}\"", topic);
        } else {
            println!("{}", render_topics(&topics));
        }
        Ok(())
    }

    pub async fn people(&self) -> Result<()> {
        println!("{}", render_people(&self.host.query_people().await?));
        Ok(())
    }

    pub async fn repl(&self) -> Result<()> {
        let id = self.host.create_conversation().await?;
        println!("Conversation {} (/history, /clear, /quit)", id);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("you> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            match line {
                "" => continue,
                "/quit" | "/exit" => break,
                "/history" => self.history(&id).await?,
                "/clear" => self.clear(&id).await?,
                text => {
                    // a failed turn leaves the conversation usable
                    if let Err(e) = self.chat(&id, text).await {
                        eprintln!("error: {}", e);
                    }
                }
            }
        }

        println!("Conversation {} kept; resume with `newsagent chat {} ...`", id, id);
        Ok(())
    }
}
