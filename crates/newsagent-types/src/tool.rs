use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Definition of a tool that the LLM can invoke.
/// Follows the OpenAI function-calling schema for broad provider compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    #[serde(rename = "type")]
    pub schema_type: String, // always "object"
    pub properties: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ToolParameters {
                schema_type: "object".to_string(),
                properties: serde_json::Map::new(),
                required: Vec::new(),
            },
        }
    }

    /// Declare a parameter the model must always supply.
    pub fn with_parameter(mut self, name: &str, kind: &str, description: &str) -> Self {
        self.parameters.required.push(name.to_string());
        self.with_optional_parameter(name, kind, description)
    }

    pub fn with_optional_parameter(mut self, name: &str, kind: &str, description: &str) -> Self {
        self.parameters.properties.insert(name.to_string(), json!({
            "type": kind,
            "description": description
        }));
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.parameters.required.iter().any(|r| r == name)
    }
}
