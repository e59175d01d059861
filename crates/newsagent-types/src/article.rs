//! Records returned by the news graph. Field names are the graph predicates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Article.title", skip_serializing_if = "String::is_empty", default)]
    pub title: String,
    #[serde(rename = "Article.abstract", skip_serializing_if = "String::is_empty", default)]
    pub abstract_text: String,
    #[serde(rename = "Article.url", skip_serializing_if = "String::is_empty", default)]
    pub url: String,
    #[serde(rename = "Article.published", skip_serializing_if = "Option::is_none", default)]
    pub published: Option<String>,
    #[serde(rename = "Article.person", skip_serializing_if = "Vec::is_empty", default)]
    pub people: Vec<Person>,
    #[serde(rename = "Article.author", skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Author>,
    #[serde(rename = "Article.org", skip_serializing_if = "Vec::is_empty", default)]
    pub organizations: Vec<Organization>,
    #[serde(rename = "Article.topic", skip_serializing_if = "Vec::is_empty", default)]
    pub topics: Vec<Topic>,
    #[serde(rename = "Article.geo", skip_serializing_if = "Vec::is_empty", default)]
    pub geos: Vec<Geo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Person.name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Author.name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Organization.name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Topic.name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Geo.name", default)]
    pub name: String,
    #[serde(rename = "Geo.location", skip_serializing_if = "Option::is_none", default)]
    pub location: Option<serde_json::Value>,
}

/// A topic together with how many articles reference it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicCount {
    #[serde(rename = "Topic.name", default)]
    pub name: String,
    #[serde(default)]
    pub article_count: u64,
}

/// A topic together with the articles that reference it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicArticles {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uid: Option<String>,
    #[serde(rename = "Topic.name", default)]
    pub name: String,
    #[serde(rename = "Topic.article", skip_serializing_if = "Vec::is_empty", default)]
    pub articles: Vec<Article>,
}

impl Geo {
    /// `[longitude, latitude]` of a GeoJSON point location
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let coords = self.location.as_ref()?.get("coordinates")?.as_array()?;
        match coords.as_slice() {
            [lon, lat] => Some((lon.as_f64()?, lat.as_f64()?)),
            _ => None,
        }
    }
}
