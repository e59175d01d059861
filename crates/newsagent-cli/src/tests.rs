#[cfg(test)]
mod tests {
    use crate::config;
    use crate::render::{render_article, render_item, render_items, render_people, render_topics};
    use newsagent_types::article::{Article, Author, Geo, Person, Topic, TopicArticles};
    use newsagent_types::config::{LlmProvider, StorageBackendType};
    use newsagent_types::item::*;
    use serde_json::{json, Map};

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_parse_partial_toml() {
        let config = config::parse(
            r#"
            [llm]
            provider = "Ollama"
            model = "llama3.1"

            [tool_loop]
            max_rounds = 5

            [storage]
            backend = "Memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Ollama);
        assert_eq!(config.llm.model, "llama3.1");
        assert_eq!(config.tool_loop.max_rounds, 5);
        assert_eq!(config.tool_loop.max_history, 20);
        assert_eq!(config.storage.backend, StorageBackendType::Memory);
        assert_eq!(config.graph.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(config::parse("[llm\nmodel = ").is_err());
        assert!(config::parse("[tool_loop]\nmax_rounds = \"three\"").is_err());
    }

    #[test]
    fn test_api_key_env_override() {
        let base = config::parse("[llm]\napi_key = \"from-file\"").unwrap();
        assert_eq!(config::apply_env(base.clone(), None).llm.api_key, "from-file");
        assert_eq!(config::apply_env(base.clone(), Some("  ".to_string())).llm.api_key, "from-file");
        assert_eq!(config::apply_env(base, Some("sk-env".to_string())).llm.api_key, "sk-env");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "[graph]\nendpoint = \"http://graph:9080\"\n").unwrap();
        let config = config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.graph.endpoint, "http://graph:9080");

        assert!(config::load(Some(dir.path().join("missing.toml").as_path())).is_err());
    }

    // ─── Render Tests ────────────────────────────────────────

    #[test]
    fn test_render_messages() {
        assert_eq!(render_item(&LedgerItem::user_message("hi")), "you> hi");
        assert_eq!(render_item(&LedgerItem::assistant_message("hello")), "assistant> hello");
    }

    #[test]
    fn test_render_tool_calls() {
        let done = ToolCallRecord::executing("c1", "analyze_topics", Map::new()).complete(json!({}));
        let failed = ToolCallRecord::executing("c2", "teleport", Map::new()).fail("unknown tool: teleport");
        let text = render_items(&[LedgerItem::tool_call(done), LedgerItem::tool_call(failed)]);
        assert_eq!(
            text,
            "  [tool] analyze_topics (completed)\n  [tool] teleport (error: unknown tool: teleport)"
        );
    }

    #[test]
    fn test_render_card() {
        let card = Card::new("article_detail", "Rivers rise", Map::new())
            .with_action(CardAction::link("view_article", "Read Full Article", "https://news.example/r"))
            .with_action(CardAction::button("summarize", "Get Summary", "summarize_article", Map::new()));
        assert_eq!(
            render_item(&LedgerItem::card(card)),
            "  [article_detail] Rivers rise\n    * Read Full Article -> https://news.example/r\n    * Get Summary"
        );
    }

    fn flood_article() -> Article {
        Article {
            title: "Rivers rise".to_string(),
            url: "https://news.example/r".to_string(),
            published: Some("2026-10-15".to_string()),
            authors: vec![Author { uid: None, name: "Ana Ruiz".to_string() }],
            topics: vec![Topic { uid: None, name: "Flooding".to_string() }],
            geos: vec![
                Geo {
                    uid: None,
                    name: "Valley".to_string(),
                    location: Some(json!({"type": "Point", "coordinates": [-1.5, 52.25]})),
                },
                Geo { uid: None, name: "Coast".to_string(), location: None },
            ],
            ..Article::default()
        }
    }

    #[test]
    fn test_render_article() {
        assert_eq!(
            render_article(&flood_article()),
            "Rivers rise (2026-10-15)\n  https://news.example/r\n  by Ana Ruiz\n  topics: Flooding\n  places: Valley [52.2500, -1.5000]; Coast"
        );
        let bare = Article { title: "Untitled".to_string(), ..Article::default() };
        assert_eq!(render_article(&bare), "Untitled");
    }

    #[test]
    fn test_render_topics_and_people() {
        let topic = TopicArticles {
            uid: None,
            name: "Flooding".to_string(),
            articles: vec![Article { title: "Rivers rise".to_string(), ..Article::default() }],
        };
        assert_eq!(render_topics(&[topic]), "# Flooding (1 articles)\n  Rivers rise");

        let people = vec![
            Person { uid: None, name: "Ada".to_string() },
            Person { uid: Some("0x2".to_string()), name: "Grace".to_string() },
        ];
        assert_eq!(render_people(&people), "Ada\nGrace");
        assert_eq!(render_people(&[]), "(no people)");
    }
}
