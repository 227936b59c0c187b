//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{RAW_ARGUMENTS_KEY, ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Rejects, in this order: arguments that were not a JSON object, argument
/// names the definition does not declare, missing required parameters, and
/// values whose JSON type does not match the declared type.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        if let Some(raw) = call.get_string(RAW_ARGUMENTS_KEY) {
            return Err(format!(
                "Arguments for tool '{}' are not a JSON object: {}",
                definition.name, raw
            ));
        }

        let mut unknown: Vec<&str> = call
            .arguments
            .keys()
            .map(|k| k.as_str())
            .filter(|k| definition.parameter(k).is_none())
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(format!(
                "Unknown parameter(s) {} for tool '{}'",
                unknown
                    .iter()
                    .map(|k| format!("'{}'", k))
                    .collect::<Vec<_>>()
                    .join(", "),
                definition.name
            ));
        }

        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                None if param.required => {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                Some(value) if !param.accepts(value) => {
                    return Err(format!(
                        "Parameter '{}' for tool '{}' must be of type {}",
                        param.name, definition.name, param.param_type
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;

    fn read_csv_definition() -> ToolDefinition {
        ToolDefinition::new("read_csv_blob", "Preview a CSV blob")
            .with_parameter(ToolParameter::new("blob_name", "Blob to read", true))
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("read_csv_blob");
        let result = DefaultToolValidator.validate(&call, &read_csv_definition());
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("read_csv_blob")
            .with_arg("blob_name", "a.csv")
            .with_arg("sheet", "1");
        let err = DefaultToolValidator
            .validate(&call, &read_csv_definition())
            .unwrap_err();
        assert!(err.contains("Unknown parameter"));
        assert!(err.contains("'sheet'"));
    }

    #[test]
    fn test_validator_unknown_param_on_parameterless_tool() {
        let definition = ToolDefinition::new("list_blobs", "List blobs");
        let call = ToolCall::new("list_blobs").with_arg("prefix", "2024/");
        assert!(DefaultToolValidator.validate(&call, &definition).is_err());
    }

    #[test]
    fn test_validator_wrong_type() {
        let call = ToolCall::new("read_csv_blob").with_arg("blob_name", 42);
        let err = DefaultToolValidator
            .validate(&call, &read_csv_definition())
            .unwrap_err();
        assert!(err.contains("must be of type string"));
    }

    #[test]
    fn test_validator_raw_arguments() {
        let call = ToolCall::from_json_arguments("c1", "read_csv_blob", "[1, 2]");
        let err = DefaultToolValidator
            .validate(&call, &read_csv_definition())
            .unwrap_err();
        assert!(err.contains("not a JSON object"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("read_csv_blob").with_arg("blob_name", "a.csv");
        assert!(
            DefaultToolValidator
                .validate(&call, &read_csv_definition())
                .is_ok()
        );
    }
}
