//! Configuration loading for the binary.

use std::path::Path;
use anyhow::{Context, Result};
use newsagent_types::config::AgentConfig;

const DEFAULT_CONFIG_FILE: &str = "newsagent.toml";
pub const API_KEY_ENV: &str = "NEWSAGENT_API_KEY";

/// Read the configuration file, if any, then apply environment overrides.
///
/// An explicit path must exist. Without one, `./newsagent.toml` is used when
/// present and defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<AgentConfig> {
    let config = match path {
        Some(path) => read_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => read_file(Path::new(DEFAULT_CONFIG_FILE))?,
        None => AgentConfig::default(),
    };
    Ok(apply_env(config, std::env::var(API_KEY_ENV).ok()))
}

fn read_file(path: &Path) -> Result<AgentConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("invalid config {}", path.display()))?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

pub fn parse(text: &str) -> Result<AgentConfig> {
    Ok(toml::from_str(text)?)
}

pub fn apply_env(mut config: AgentConfig, api_key: Option<String>) -> AgentConfig {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.llm.api_key = key;
    }
    config
}
