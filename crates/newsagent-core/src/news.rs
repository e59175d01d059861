//! Direct news-graph queries, outside any conversation.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use newsagent_types::{
    AgentError, Result,
    article::{Article, Person, TopicArticles},
};
use crate::ports::{GraphQuery, QueryPort};

const LATEST_ARTICLES: &str = r#"
query latest_articles($num: int) {
    articles(func: type(Article), orderdesc: Article.published, first: $num) {
        uid
        Article.title
        Article.abstract
        Article.url
        Article.published
        Article.geo { Geo.name }
        Article.org { Organization.name }
        Article.topic { Topic.name }
        Article.person { Person.name }
        Article.author: ~Author.article { Author.name }
    }
}"#;

const TOPICS_BY_NAME: &str = r#"
query topics_by_name($topic: string) {
    topics(func: anyoftext(Topic.name, $topic), first: 10) {
        uid
        Topic.name
        Topic.article: ~Article.topic {
            uid
            Article.title
            Article.abstract
            Article.url
            Article.author: ~Author.article { Author.name }
            Article.org { Organization.name }
            Article.topic { Topic.name }
            Article.geo { Geo.name Geo.location }
        }
    }
}"#;

const PEOPLE: &str = r#"
{
    people(func: type(Person)) {
        uid
        Person.name
    }
}"#;

#[derive(Deserialize)]
struct Articles {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct Topics {
    #[serde(default)]
    topics: Vec<TopicArticles>,
}

#[derive(Deserialize)]
struct People {
    #[serde(default)]
    people: Vec<Person>,
}

fn decode<T: DeserializeOwned>(data: Value, what: &str) -> Result<T> {
    serde_json::from_value(data).map_err(|e| AgentError::Query(format!("failed to parse {}: {}", what, e)))
}

/// The `num` most recently published articles (at least one).
pub async fn latest_articles(graph: &dyn QueryPort, num: usize) -> Result<Vec<Article>> {
    let data = graph
        .execute(GraphQuery::new(LATEST_ARTICLES).with_variable("$num", num.max(1)))
        .await?;
    Ok(decode::<Articles>(data, "articles")?.articles)
}

/// Up to ten topics whose name matches `topic`, each with its articles.
pub async fn topics_by_name(graph: &dyn QueryPort, topic: &str) -> Result<Vec<TopicArticles>> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AgentError::InvalidRequest("topic is empty".to_string()));
    }
    let data = graph
        .execute(GraphQuery::new(TOPICS_BY_NAME).with_variable("$topic", topic))
        .await?;
    Ok(decode::<Topics>(data, "topics")?.topics)
}

pub async fn people(graph: &dyn QueryPort) -> Result<Vec<Person>> {
    let data = graph.execute(GraphQuery::new(PEOPLE)).await?;
    Ok(decode::<People>(data, "people")?.people)
}
