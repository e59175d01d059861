use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use newsagent_types::{
    AgentError, Result,
    article::Article,
    item::{Card, CardAction},
    tool::ToolDefinition,
};
use crate::ports::{GraphQuery, QueryPort};
use super::{object, ToolArgs, ToolContext, ToolHandler};

const SEARCH_ARTICLES: &str = r#"
query search_articles($query: string, $limit: int) {
    articles(func: type(Article), first: $limit)
        @filter(anyoftext(Article.title, $query) OR anyoftext(Article.abstract, $query)) {
        uid
        Article.title
        Article.abstract
        Article.url
        Article.published
        Article.topic { Topic.name }
        Article.org { Organization.name }
        Article.geo { Geo.name }
    }
}"#;

const GET_ARTICLE: &str = r#"
query get_article($id: string) {
    article(func: uid($id)) @filter(type(Article)) {
        uid
        Article.title
        Article.abstract
        Article.url
        Article.published
        Article.topic { Topic.name }
        Article.org { Organization.name }
        Article.geo { Geo.name }
        Article.person { Person.name }
    }
}"#;

const ARTICLES_BY_LOCATION: &str = r#"
query articles_by_location($location: string, $limit: int) {
    articles(func: type(Article), first: $limit) @cascade {
        uid
        Article.title
        Article.abstract
        Article.url
        Article.published
        Article.geo @filter(anyoftext(Geo.name, $location)) { Geo.name }
    }
}"#;

const ARTICLES_BY_ORGANIZATION: &str = r#"
query articles_by_org($org: string, $limit: int) {
    articles(func: type(Article), first: $limit) @cascade {
        uid
        Article.title
        Article.abstract
        Article.url
        Article.published
        Article.org @filter(anyoftext(Organization.name, $org)) { Organization.name }
    }
}"#;

#[derive(Deserialize)]
struct ArticleList {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct SingleArticle {
    #[serde(default)]
    article: Vec<Article>,
}

async fn query_articles(graph: &dyn QueryPort, query: GraphQuery) -> Result<Vec<Article>> {
    let data = graph.execute(query).await?;
    let list: ArticleList = serde_json::from_value(data)
        .map_err(|e| AgentError::Query(format!("failed to parse articles: {}", e)))?;
    Ok(list.articles)
}

/// Look up one article by uid.
pub(super) async fn fetch_article(graph: &dyn QueryPort, article_id: &str) -> Result<Article> {
    let data = graph
        .execute(GraphQuery::new(GET_ARTICLE).with_variable("$id", article_id))
        .await?;
    let found: SingleArticle = serde_json::from_value(data)
        .map_err(|e| AgentError::Query(format!("failed to parse article: {}", e)))?;
    found
        .article
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::NotFound("article".to_string()))
}

pub(super) fn article_detail_card(article: &Article, article_id: &str) -> Card {
    let content = object(json!({
        "abstract": article.abstract_text,
        "url": article.url,
        "published": article.published,
        "topics": article.topics,
        "organizations": article.organizations,
        "locations": article.geos,
        "people": article.people,
    }));
    Card::new("article_detail", article.title.clone(), content)
        .with_action(CardAction::link("view_article", "Read Full Article", article.url.clone()))
        .with_action(CardAction::button(
            "summarize",
            "Get Summary",
            "summarize_article",
            object(json!({ "article_id": article_id })),
        ))
}

fn limit(args: &ToolArgs) -> i64 {
    args.int_or("limit", 5).max(1)
}

// ─── search_articles ─────────────────────────────────────────

pub struct SearchArticles;

#[async_trait]
impl ToolHandler for SearchArticles {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("search_articles", "Search for news articles in the news database")
            .with_parameter("query", "string", "Search query for articles")
            .with_optional_parameter("limit", "number", "Maximum number of articles to return (default: 5)")
    }

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let query = args.require_str("search_articles", "query")?;
        let limit = limit(args);

        let articles = query_articles(
            ctx.graph,
            GraphQuery::new(SEARCH_ARTICLES)
                .with_variable("$query", &query)
                .with_variable("$limit", limit),
        )
        .await?;

        if !articles.is_empty() {
            let content = object(json!({
                "query": query,
                "results_count": articles.len(),
                "articles": articles,
            }));
            let card = Card::new(
                "articles",
                format!("Found {} articles for \"{}\"", articles.len(), query),
                content,
            )
            .with_action(CardAction::button(
                "search_more",
                "Search more articles",
                "search_articles",
                object(json!({ "query": query })),
            ));
            ctx.emit_card(card);
        }

        Ok(json!({
            "query": query,
            "articles_found": articles.len(),
            "articles": articles,
        }))
    }
}

// ─── get_article_by_id ───────────────────────────────────────

pub struct GetArticleById;

#[async_trait]
impl ToolHandler for GetArticleById {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_article_by_id", "Get a specific article by its ID")
            .with_parameter("article_id", "string", "The ID of the article to retrieve")
    }

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let article_id = args.require_str("get_article_by_id", "article_id")?;
        let article = fetch_article(ctx.graph, &article_id).await?;
        ctx.emit_card(article_detail_card(&article, &article_id));
        Ok(serde_json::to_value(&article)?)
    }
}

// ─── get_articles_by_location ────────────────────────────────

pub struct GetArticlesByLocation;

#[async_trait]
impl ToolHandler for GetArticlesByLocation {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_articles_by_location", "Find articles related to a specific location")
            .with_parameter("location", "string", "Geographic location to search for")
            .with_optional_parameter("limit", "number", "Maximum number of articles to return (default: 5)")
    }

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let location = args.require_str("get_articles_by_location", "location")?;
        let articles = query_articles(
            ctx.graph,
            GraphQuery::new(ARTICLES_BY_LOCATION)
                .with_variable("$location", &location)
                .with_variable("$limit", limit(args)),
        )
        .await?;

        Ok(json!({
            "location": location,
            "articles_found": articles.len(),
            "articles": articles,
        }))
    }
}

// ─── get_articles_by_organization ────────────────────────────

pub struct GetArticlesByOrganization;

#[async_trait]
impl ToolHandler for GetArticlesByOrganization {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_articles_by_organization", "Find articles mentioning specific organizations")
            .with_parameter("organization", "string", "Organization name to search for")
            .with_optional_parameter("limit", "number", "Maximum number of articles to return (default: 5)")
    }

    async fn call(&self, args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Value> {
        let organization = args.require_str("get_articles_by_organization", "organization")?;
        let articles = query_articles(
            ctx.graph,
            GraphQuery::new(ARTICLES_BY_ORGANIZATION)
                .with_variable("$org", &organization)
                .with_variable("$limit", limit(args)),
        )
        .await?;

        Ok(json!({
            "organization": organization,
            "articles_found": articles.len(),
            "articles": articles,
        }))
    }
}
