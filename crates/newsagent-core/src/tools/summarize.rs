use async_trait::async_trait;
use serde_json::{json, Value};
use newsagent_types::{
    AgentError, Result,
    message::Message,
    tool::ToolDefinition,
};
use crate::ports::{ChatRequest, ToolChoice};
use super::articles::{article_detail_card, fetch_article};
use super::{ToolArgs, ToolContext, ToolHandler};

const SUMMARIZER_PROMPT: &str = "You are a helpful assistant that creates concise, informative summaries of news articles. \
Focus on the key points, main themes, and important details.";

pub struct SummarizeArticle;

#[async_trait]
impl ToolHandler for SummarizeArticle {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("summarize_article", "Generate a summary of an article")
            .with_parameter("article_id", "string", "The ID of the article to summarize")
    }

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let article_id = args.require_str("summarize_article", "article_id")?;
        let article = fetch_article(ctx.graph, &article_id).await?;
        ctx.emit_card(article_detail_card(&article, &article_id));

        let req = ChatRequest {
            messages: vec![
                Message::system(SUMMARIZER_PROMPT),
                Message::user(format!(
                    "Please summarize this article:\n\nTitle: {}\n\nAbstract: {}\n\n\
                     Create a 2-3 sentence summary focusing on the most important points.",
                    article.title, article.abstract_text
                )),
            ],
            tools: Vec::new(),
            tool_choice: ToolChoice::None,
            model: ctx.llm_config.model.clone(),
            max_tokens: ctx.llm_config.max_tokens,
            temperature: ctx.llm_config.summary_temperature,
        };
        // A rejected summary belongs to this call; only transport failures abort the turn
        let response = ctx.llm.chat_completion(req).await.map_err(|e| match e {
            AgentError::Llm(msg) => AgentError::ToolFailed {
                tool: "summarize_article".to_string(),
                message: format!("failed to generate summary: {}", msg),
            },
            other => other,
        })?;

        Ok(json!({
            "article_id": article_id,
            "title": article.title,
            "summary": response.message.content,
            "url": article.url,
        }))
    }
}
