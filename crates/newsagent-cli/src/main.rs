//! newsagent - chat with a news assistant that queries a Dgraph news graph.
//!
//! Each subcommand maps onto one host operation; `repl` keeps a single
//! conversation open on stdin.

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod config;
mod render;
#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "newsagent")]
#[command(about = "News assistant with tool-calling over a news graph", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to ./newsagent.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new conversation and print its id
    New,

    /// Send one message to a conversation
    Chat {
        id: String,
        /// Message text; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Print a conversation's items
    History { id: String },

    /// Remove all items from a conversation
    Clear { id: String },

    /// Delete a conversation
    Delete { id: String },

    /// List stored conversations
    List,

    /// Print the most recently published articles
    Articles {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print topics matching a name, with their articles
    Topics {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },

    /// Print the people known to the news graph
    People,

    /// Chat interactively in a new conversation
    ///
    /// Lines starting with `/` are commands: /history, /clear, /quit
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries conversation output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(cli.config.as_deref())?;
    let app = app::App::new(config).await?;

    match cli.command {
        Commands::New => app.new_conversation().await,
        Commands::Chat { id, message } => app.chat(&id, &message.join(" ")).await,
        Commands::History { id } => app.history(&id).await,
        Commands::Clear { id } => app.clear(&id).await,
        Commands::Delete { id } => app.delete(&id).await,
        Commands::List => app.list().await,
        Commands::Articles { limit } => app.articles(limit).await,
        Commands::Topics { topic } => app.topics(&topic.join(" ")).await,
        Commands::People => app.people().await,
        Commands::Repl => app.repl().await,
    }
}
