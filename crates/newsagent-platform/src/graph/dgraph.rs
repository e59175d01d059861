//! Dgraph adapter for the graph query port.
//!
//! Queries are posted as `{"query": …, "variables": {…}}` to `{endpoint}/query`.
//! Anything the server reports under `errors` becomes [`AgentError::Query`].

use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use newsagent_core::ports::{GraphQuery, QueryPort};
use newsagent_types::{AgentError, Result, config::GraphConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ACCESS_TOKEN_HEADER: &str = "X-Dgraph-AccessToken";

pub struct DgraphExecutor {
    query_url: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl DgraphExecutor {
    pub fn new(config: &GraphConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(AgentError::Config("graph endpoint is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::Network(e.to_string()))?;
        Ok(Self {
            query_url: format!("{}/query", endpoint),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
            http,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

#[async_trait]
impl QueryPort for DgraphExecutor {
    async fn execute(&self, query: GraphQuery) -> Result<Value> {
        let mut request = self.http.post(&self.query_url).json(&build_query_body(&query));
        if let Some(token) = &self.access_token {
            request = request.header(ACCESS_TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(AgentError::Query(format!("HTTP {}: {}", status, text)));
        }

        let reply: QueryReply = serde_json::from_str(&text)
            .map_err(|e| AgentError::Query(format!("unreadable response: {}", e)))?;
        extract_data(reply)
    }
}

#[derive(Deserialize)]
pub(crate) struct QueryReply {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<QueryErrorEntry>,
}

#[derive(Deserialize)]
struct QueryErrorEntry {
    #[serde(default)]
    message: String,
}

pub(crate) fn build_query_body(query: &GraphQuery) -> Value {
    json!({
        "query": query.query,
        "variables": query.variables,
    })
}

pub(crate) fn extract_data(reply: QueryReply) -> Result<Value> {
    if !reply.errors.is_empty() {
        let messages: Vec<&str> = reply.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(AgentError::Query(messages.join("; ")));
    }
    Ok(reply.data.unwrap_or_else(|| json!({})))
}
