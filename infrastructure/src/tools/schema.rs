//! JSON Schema tool converter.
//!
//! Renders [`ToolDefinition`]s in the function-calling format of
//! OpenAI-compatible chat APIs.

use blob_agent_domain::ToolDefinition;
use serde_json::{Map, Value, json};

/// Converts tool definitions into function-tool JSON.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    /// JSON Schema object describing a tool's parameters
    pub fn parameters_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            properties.insert(
                param.name.clone(),
                json!({
                    "type": schema_type,
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// One `{"type": "function", ...}` entry
    pub fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let description = if tool.returns.is_empty() {
            tool.description.clone()
        } else {
            format!("{} Returns: {}", tool.description, tool.returns)
        };

        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": description,
                "parameters": self.parameters_schema(tool),
            }
        })
    }

    /// All tools, in the order given
    pub fn tools_schema(&self, tools: &[ToolDefinition]) -> Vec<Value> {
        tools.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blob_agent_domain::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("read_csv_blob", "Preview a CSV blob.")
            .with_parameter(ToolParameter::new("blob_name", "Blob to read", true))
            .with_parameter(
                ToolParameter::new("max_rows", "Rows to show", false).with_type("integer"),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "read_csv_blob");
        assert_eq!(schema["function"]["description"], "Preview a CSV blob.");

        let params = &schema["function"]["parameters"];
        assert_eq!(params["type"], "object");
        assert_eq!(params["properties"]["blob_name"]["type"], "string");
        assert_eq!(params["properties"]["blob_name"]["description"], "Blob to read");
        assert_eq!(params["properties"]["max_rows"]["type"], "integer");

        let required = params["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "blob_name");
    }

    #[test]
    fn test_parameterless_tool() {
        let tool = ToolDefinition::new("list_blobs", "Lists all blobs.")
            .with_returns("Comma-separated blob names");
        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);

        let params = &schema["function"]["parameters"];
        assert!(params["properties"].as_object().unwrap().is_empty());
        assert!(params["required"].as_array().unwrap().is_empty());
        assert_eq!(
            schema["function"]["description"],
            "Lists all blobs. Returns: Comma-separated blob names"
        );
    }

    #[test]
    fn test_tools_schema_keeps_order() {
        let tools = vec![
            ToolDefinition::new("zeta", "z"),
            ToolDefinition::new("alpha", "a"),
        ];
        let schemas = JsonSchemaToolConverter.tools_schema(&tools);
        assert_eq!(schemas[0]["function"]["name"], "zeta");
        assert_eq!(schemas[1]["function"]["name"], "alpha");
    }
}
