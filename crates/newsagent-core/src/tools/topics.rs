use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use newsagent_types::{
    AgentError, Result,
    article::TopicCount,
    item::{Card, CardAction},
    tool::ToolDefinition,
};
use crate::ports::GraphQuery;
use super::{object, ToolArgs, ToolContext, ToolHandler};

const ANALYZE_TOPICS: &str = r#"
query analyze_topics($limit: int) {
    topics(func: type(Topic), first: $limit) {
        Topic.name
        article_count: count(~Article.topic)
    }
}"#;

#[derive(Deserialize)]
struct TopicList {
    #[serde(default)]
    topics: Vec<TopicCount>,
}

pub struct AnalyzeTopics;

#[async_trait]
impl ToolHandler for AnalyzeTopics {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("analyze_topics", "Analyze trending topics in recent articles")
            .with_optional_parameter("days", "number", "Number of days to look back (default: 7)")
            .with_optional_parameter("limit", "number", "Maximum number of topics to return (default: 10)")
    }

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let days = args.int_or("days", 7).max(1);
        let limit = args.int_or("limit", 10).max(1);

        let data = ctx
            .graph
            .execute(GraphQuery::new(ANALYZE_TOPICS).with_variable("$limit", limit))
            .await?;
        let mut topics = serde_json::from_value::<TopicList>(data)
            .map_err(|e| AgentError::Query(format!("failed to parse topics: {}", e)))?
            .topics;
        // Busiest first; ties keep graph order
        topics.sort_by(|a, b| b.article_count.cmp(&a.article_count));

        if !topics.is_empty() {
            let card = Card::new(
                "topics_analysis",
                format!("Top {} Topics (Last {} days)", topics.len(), days),
                object(json!({ "days": days, "topics": topics })),
            )
            .with_action(CardAction::button(
                "analyze_more",
                "Analyze More Topics",
                "analyze_topics",
                object(json!({ "days": days * 2 })),
            ));
            ctx.emit_card(card);
        }

        Ok(json!({
            "days": days,
            "topics_found": topics.len(),
            "topics": topics,
        }))
    }
}
