#[cfg(test)]
mod tests {
    use crate::graph::dgraph::{build_query_body, extract_data, QueryReply};
    use crate::llm::openai_compat::{build_request_body, message_to_json, parse_api_message, ApiResponse};
    use crate::storage::file::{decode_key, encode_key};
    use crate::{DgraphExecutor, OpenAiCompatProvider};
    use newsagent_core::ports::{ChatRequest, GraphQuery, ToolChoice};
    use newsagent_types::config::{GraphConfig, LlmConfig, LlmProvider};
    use newsagent_types::message::*;
    use newsagent_types::tool::ToolDefinition;
    use newsagent_types::AgentError;
    use serde_json::{json, Value};

    fn request(tools: Vec<ToolDefinition>, tool_choice: ToolChoice) -> ChatRequest {
        ChatRequest {
            messages: vec![Message::system("sys"), Message::user("hi")],
            tools,
            tool_choice,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 256,
            temperature: 0.7,
        }
    }

    // ─── OpenAI Request Tests ────────────────────────────────

    #[test]
    fn test_request_body_with_tools() {
        let tool = ToolDefinition::new("search_articles", "Search").with_parameter("query", "string", "q");
        let body = build_request_body(&request(vec![tool], ToolChoice::Auto));

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "search_articles");
        assert_eq!(body["tools"][0]["function"]["parameters"]["required"][0], "query");
    }

    #[test]
    fn test_request_body_without_tools() {
        let body = build_request_body(&request(vec![], ToolChoice::None));
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn test_tool_messages_to_json() {
        let call = Message::assistant_with_tools(
            "",
            vec![ToolCallRequest::new("call_1", "analyze_topics", r#"{"days":7}"#)],
        );
        let json = message_to_json(&call);
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], Value::Null);
        assert_eq!(json["tool_calls"][0]["id"], "call_1");
        assert_eq!(json["tool_calls"][0]["type"], "function");
        assert_eq!(json["tool_calls"][0]["function"]["arguments"], r#"{"days":7}"#);

        let result = message_to_json(&Message::tool_result("call_1", "{\"topics_found\":0}"));
        assert_eq!(result["role"], "tool");
        assert_eq!(result["tool_call_id"], "call_1");
        assert_eq!(result["content"], "{\"topics_found\":0}");
    }

    // ─── OpenAI Response Tests ───────────────────────────────

    #[test]
    fn test_parse_text_response() {
        let raw = json!({
            "choices": [{"message": {"role": "assistant", "content": "Hello"}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
        });
        let resp: ApiResponse = serde_json::from_value(raw).unwrap();
        assert!(resp.usage.is_some());
        let msg = parse_api_message(resp.choices.into_iter().next().unwrap().message);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hello");
        assert!(!msg.has_tool_calls());
    }

    #[test]
    fn test_parse_tool_call_response() {
        let raw = json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_9",
                    "type": "function",
                    "function": {"name": "search_articles", "arguments": "{\"query\":\"floods\"}"}
                }]
            }}]
        });
        let resp: ApiResponse = serde_json::from_value(raw).unwrap();
        let msg = parse_api_message(resp.choices.into_iter().next().unwrap().message);
        assert_eq!(msg.content, "");
        assert_eq!(msg.tool_calls.len(), 1);
        assert_eq!(msg.tool_calls[0].function.name, "search_articles");
        assert_eq!(msg.tool_calls[0].function.arguments, "{\"query\":\"floods\"}");
    }

    #[test]
    fn test_provider_base_url() {
        let provider = OpenAiCompatProvider::new(LlmConfig::default()).unwrap();
        assert_eq!(provider.base_url(), "https://api.openai.com");

        let custom = LlmConfig {
            api_base: Some("http://localhost:9000/".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(OpenAiCompatProvider::new(custom).unwrap().base_url(), "http://localhost:9000");

        let missing = LlmConfig {
            provider: LlmProvider::Custom,
            ..LlmConfig::default()
        };
        assert!(matches!(OpenAiCompatProvider::new(missing), Err(AgentError::Config(_))));
    }

    // ─── Dgraph Tests ────────────────────────────────────────

    #[test]
    fn test_query_body() {
        let query = GraphQuery::new("query q($limit: int) { x }").with_variable("$limit", 5);
        let body = build_query_body(&query);
        assert_eq!(body["query"], "query q($limit: int) { x }");
        assert_eq!(body["variables"]["$limit"], "5");
    }

    #[test]
    fn test_extract_data() {
        let ok: QueryReply = serde_json::from_value(json!({"data": {"articles": []}})).unwrap();
        assert_eq!(extract_data(ok).unwrap(), json!({"articles": []}));

        let empty: QueryReply = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_data(empty).unwrap(), json!({}));

        let failed: QueryReply = serde_json::from_value(json!({
            "errors": [{"message": "line 1: bad"}, {"message": "line 2: worse"}]
        }))
        .unwrap();
        assert_eq!(
            extract_data(failed).unwrap_err(),
            AgentError::Query("line 1: bad; line 2: worse".to_string())
        );
    }

    #[test]
    fn test_dgraph_endpoint() {
        let executor = DgraphExecutor::new(&GraphConfig {
            endpoint: "http://graph:8080/".to_string(),
            access_token: Some(String::new()),
        })
        .unwrap();
        assert_eq!(executor.query_url(), "http://graph:8080/query");

        let blank = GraphConfig {
            endpoint: String::new(),
            access_token: None,
        };
        assert!(DgraphExecutor::new(&blank).is_err());
    }

    // ─── Key Encoding Tests ──────────────────────────────────

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("agent/abc-1"), "agent%2Fabc-1");
        assert_eq!(encode_key("a.b"), "a%2Eb");
        for key in ["agent/0f8c", "weird key/..", "ünïcode"] {
            assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
        }
        assert!(decode_key("bad%Z").is_none());
    }
}
