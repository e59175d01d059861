//! Plain-text rendering of ledger items and graph records.

use newsagent_types::article::{Article, Person, TopicArticles};
use newsagent_types::item::{ActionKind, Card, ItemBody, LedgerItem, MessageRole, ToolCallRecord, ToolCallStatus};

pub fn render_items(items: &[LedgerItem]) -> String {
    items
        .iter()
        .map(render_item)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_item(item: &LedgerItem) -> String {
    match &item.body {
        ItemBody::Message { role, content } => {
            let prefix = match role {
                MessageRole::User => "you",
                MessageRole::Assistant => "assistant",
            };
            format!("{}> {}", prefix, content)
        }
        ItemBody::ToolCall { tool_call } => render_tool_call(tool_call),
        ItemBody::Card { card } => render_card(card),
    }
}

fn render_tool_call(call: &ToolCallRecord) -> String {
    let status = match call.status {
        ToolCallStatus::Executing => "executing".to_string(),
        ToolCallStatus::Completed => "completed".to_string(),
        ToolCallStatus::Error => format!("error: {}", call.error.as_deref().unwrap_or("unknown")),
    };
    format!("  [tool] {} ({})", call.name, status)
}

fn render_card(card: &Card) -> String {
    let mut out = format!("  [{}] {}", card.card_type, card.title);
    for action in &card.actions {
        let target = match action.kind {
            ActionKind::Link => format!(" -> {}", action.action),
            ActionKind::Button => String::new(),
        };
        out.push_str(&format!("\n    * {}{}", action.label, target));
    }
    out
}

pub fn render_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .map(render_article)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_article(article: &Article) -> String {
    let mut out = article.title.clone();
    if let Some(published) = &article.published {
        out.push_str(&format!(" ({})", published));
    }
    if !article.url.is_empty() {
        out.push_str(&format!("\n  {}", article.url));
    }
    if !article.authors.is_empty() {
        let names: Vec<&str> = article.authors.iter().map(|a| a.name.as_str()).collect();
        out.push_str(&format!("\n  by {}", names.join(", ")));
    }
    if !article.topics.is_empty() {
        let names: Vec<&str> = article.topics.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!("\n  topics: {}", names.join(", ")));
    }
    let places: Vec<String> = article
        .geos
        .iter()
        .map(|geo| match geo.coordinates() {
            Some((lon, lat)) => format!("{} [{:.4}, {:.4}]", geo.name, lat, lon),
            None => geo.name.clone(),
        })
        .collect();
    if !places.is_empty() {
        out.push_str(&format!("\n  places: {}", places.join("; ")));
    }
    out
}

pub fn render_topics(topics: &[TopicArticles]) -> String {
    topics
        .iter()
        .map(|topic| {
            let mut out = format!("# {} ({} articles)", topic.name, topic.articles.len());
            for article in &topic.articles {
                for line in render_article(article).lines() {
                    out.push_str(&format!("\n  {}", line));
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_people(people: &[Person]) -> String {
    if people.is_empty() {
        return "(no people)".to_string();
    }
    people
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
