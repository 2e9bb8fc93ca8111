//! Tool definitions and parameter types for the MCP surface

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AddPromptParams {
    pub prefix: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub example_template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddExemplarParams {
    pub prompt_id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct CorrectExemplarParams {
    pub prompt_id: String,
    pub exemplar_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct GetPromptParams {
    pub prompt_id: String,
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptInfoParams {
    pub prompt_id: String,
}

fn schema(value: Value) -> Arc<JsonObject> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// The tool surface, in the order clients list it.
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "add_prompt",
            "Create a new few-shot prompt. Returns the prompt id.",
            schema(json!({
                "type": "object",
                "properties": {
                    "prefix": {
                        "type": "string",
                        "description": "Instruction text placed before the exemplars"
                    },
                    "suffix": {
                        "type": "string",
                        "description": "Template for the novel input; must contain {input}"
                    },
                    "example_template": {
                        "type": "string",
                        "description": "Per-exemplar template; must contain {question} and {answer}"
                    }
                },
                "required": ["prefix"]
            })),
        ),
        Tool::new(
            "add_exemplar",
            "Append a question/answer exemplar to a prompt. Returns the exemplar id.",
            schema(json!({
                "type": "object",
                "properties": {
                    "prompt_id": { "type": "string" },
                    "question": { "type": "string" },
                    "answer": { "type": "string" }
                },
                "required": ["prompt_id", "question", "answer"]
            })),
        ),
        Tool::new(
            "correct_exemplar",
            "Replace a stored exemplar's answer in place.",
            schema(json!({
                "type": "object",
                "properties": {
                    "prompt_id": { "type": "string" },
                    "exemplar_id": { "type": "string" },
                    "answer": { "type": "string" }
                },
                "required": ["prompt_id", "exemplar_id", "answer"]
            })),
        ),
        Tool::new(
            "get_prompt",
            "Render a prompt with its exemplars, optionally filling in a novel input.",
            schema(json!({
                "type": "object",
                "properties": {
                    "prompt_id": { "type": "string" },
                    "input": {
                        "type": "string",
                        "description": "Novel question substituted into the suffix"
                    }
                },
                "required": ["prompt_id"]
            })),
        ),
        Tool::new(
            "get_prompt_info",
            "Markdown summary of a prompt and its exemplars.",
            schema(json!({
                "type": "object",
                "properties": {
                    "prompt_id": { "type": "string" }
                },
                "required": ["prompt_id"]
            })),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definitions_cover_the_crud_surface() {
        let names: Vec<_> = tool_definitions()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "add_prompt",
                "add_exemplar",
                "correct_exemplar",
                "get_prompt",
                "get_prompt_info"
            ]
        );
    }

    #[test]
    fn test_params_deserialize_with_optional_fields() {
        let params: AddPromptParams =
            serde_json::from_value(json!({ "prefix": "Guess." })).unwrap();
        assert_eq!(params.prefix, "Guess.");
        assert!(params.suffix.is_none());
        assert!(params.example_template.is_none());

        let params: GetPromptParams =
            serde_json::from_value(json!({ "prompt_id": "abc", "input": "q?" })).unwrap();
        assert_eq!(params.input.as_deref(), Some("q?"));
    }
}
