//! ServerHandler implementation backed by the prompt store

use fewshot::{ExemplarId, PromptId, PromptService, StoreError};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, GetPromptRequestParam,
    GetPromptResult, Implementation, JsonObject, ListPromptsResult, ListToolsResult,
    PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
    ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::tools::{
    AddExemplarParams, AddPromptParams, CorrectExemplarParams, GetPromptParams, PromptInfoParams,
    tool_definitions,
};

fn parse_params<T: DeserializeOwned>(args: JsonObject) -> Result<T, ErrorData> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ErrorData::invalid_params(format!("invalid arguments: {e}"), None))
}

fn map_store_error(e: StoreError) -> ErrorData {
    match e {
        StoreError::PromptNotFound(_)
        | StoreError::ExemplarNotFound(_)
        | StoreError::InvalidId(_) => ErrorData::invalid_params(e.to_string(), None),
        StoreError::Core(_) => ErrorData::internal_error(e.to_string(), None),
    }
}

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// MCP server over an in-memory prompt store.
#[derive(Clone)]
pub struct FewShotServer {
    service: PromptService,
}

impl FewShotServer {
    /// Create a server over the given store service
    pub fn new(service: PromptService) -> Self {
        Self { service }
    }

    async fn prompt_info(&self, params: PromptInfoParams) -> Result<String, ErrorData> {
        let id = PromptId::parse(&params.prompt_id).map_err(map_store_error)?;
        let prompt = self
            .service
            .get_prompt(&id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                ErrorData::invalid_params(format!("Prompt not found: {id}"), None)
            })?;
        let exemplars = self.service.exemplars(&id).await.map_err(map_store_error)?;

        let mut info = format!("# Prompt {id}\n\n");
        info.push_str(&format!("**Created:** {}\n\n", prompt.created_at));
        info.push_str(&format!("**Updated:** {}\n\n", prompt.updated_at));
        info.push_str(&format!("**Exemplar count:** {}\n", exemplars.len()));
        if !prompt.prefix.is_empty() {
            info.push_str(&format!("\n## Prefix\n\n{}\n", prompt.prefix));
        }
        if !exemplars.is_empty() {
            info.push_str("\n## Exemplars\n");
            for exemplar in &exemplars {
                info.push_str(&format!(
                    "\n- `{}`\n  Q: {}\n  A: {}\n",
                    exemplar.id, exemplar.question, exemplar.answer
                ));
            }
        }
        Ok(info)
    }

    /// Tool dispatch, separated from the transport context for testability.
    pub async fn dispatch(
        &self,
        name: &str,
        args: JsonObject,
    ) -> Result<CallToolResult, ErrorData> {
        match name {
            "add_prompt" => {
                let params: AddPromptParams = parse_params(args)?;
                let prompt = self
                    .service
                    .add_prompt(params.prefix, params.suffix, params.example_template)
                    .await
                    .map_err(map_store_error)?;
                info!(prompt_id = %prompt.id, "prompt created");
                Ok(text_result(prompt.id.to_string()))
            }
            "add_exemplar" => {
                let params: AddExemplarParams = parse_params(args)?;
                let id = PromptId::parse(&params.prompt_id).map_err(map_store_error)?;
                let exemplar = self
                    .service
                    .add_exemplar(&id, params.question, params.answer)
                    .await
                    .map_err(map_store_error)?;
                info!(prompt_id = %id, exemplar_id = %exemplar.id, "exemplar added");
                Ok(text_result(exemplar.id.to_string()))
            }
            "correct_exemplar" => {
                let params: CorrectExemplarParams = parse_params(args)?;
                let prompt_id = PromptId::parse(&params.prompt_id).map_err(map_store_error)?;
                let exemplar_id =
                    ExemplarId::parse(&params.exemplar_id).map_err(map_store_error)?;
                self.service
                    .correct_exemplar(&prompt_id, &exemplar_id, params.answer)
                    .await
                    .map_err(map_store_error)?;
                info!(prompt_id = %prompt_id, exemplar_id = %exemplar_id, "exemplar corrected");
                Ok(text_result("Exemplar corrected."))
            }
            "get_prompt" => {
                let params: GetPromptParams = parse_params(args)?;
                let id = PromptId::parse(&params.prompt_id).map_err(map_store_error)?;
                let rendered = self
                    .service
                    .render(&id, params.input.as_deref().unwrap_or_default())
                    .await
                    .map_err(map_store_error)?;
                Ok(text_result(rendered))
            }
            "get_prompt_info" => {
                let params: PromptInfoParams = parse_params(args)?;
                let info = self.prompt_info(params).await?;
                Ok(text_result(info))
            }
            other => Err(ErrorData::invalid_params(
                format!("unknown tool: {other}"),
                None,
            )),
        }
    }
}

impl ServerHandler for FewShotServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Curate few-shot prompts: create a prompt with add_prompt, append \
                 exemplars with add_exemplar, then fetch the rendered prompt with \
                 get_prompt."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: tool_definitions(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.unwrap_or_default();
        self.dispatch(request.name.as_ref(), args).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        let prompts = self
            .service
            .list_prompts()
            .await
            .map_err(map_store_error)?
            .into_iter()
            .map(|p| {
                Prompt::new(
                    p.id.to_string(),
                    Some("Few-shot prompt with curated exemplars"),
                    Some(vec![PromptArgument {
                        name: "input".to_string(),
                        title: None,
                        description: Some("Novel question for the suffix".to_string()),
                        required: Some(false),
                    }]),
                )
            })
            .collect();
        Ok(ListPromptsResult {
            prompts,
            ..Default::default()
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let id = PromptId::parse(&request.name).map_err(map_store_error)?;
        let input = request
            .arguments
            .as_ref()
            .and_then(|args| args.get("input"))
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let rendered = self
            .service
            .render(&id, input)
            .await
            .map_err(map_store_error)?;
        Ok(GetPromptResult {
            description: Some("Rendered few-shot prompt".to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, rendered)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }

    fn result_text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_add_prompt_then_get_prompt_round_trip() {
        let server = FewShotServer::new(PromptService::in_memory());
        let created = server
            .dispatch("add_prompt", args(json!({ "prefix": "Guess." })))
            .await
            .unwrap();
        let prompt_id = result_text(&created);

        server
            .dispatch(
                "add_exemplar",
                args(json!({
                    "prompt_id": prompt_id,
                    "question": "Who died younger, Muhammad Ali or Alan Turing?",
                    "answer": "Alan Turing 🇬🇧: 41 years old"
                })),
            )
            .await
            .unwrap();

        let rendered = server
            .dispatch(
                "get_prompt",
                args(json!({ "prompt_id": prompt_id, "input": "Who?" })),
            )
            .await
            .unwrap();
        let text = result_text(&rendered);
        assert!(text.starts_with("Guess."));
        assert!(text.contains("Q: Who died younger, Muhammad Ali or Alan Turing?"));
        assert!(text.ends_with("Q: Who?"));
    }

    #[tokio::test]
    async fn test_exemplar_for_unknown_prompt_is_invalid_params() {
        let server = FewShotServer::new(PromptService::in_memory());
        let err = server
            .dispatch(
                "add_exemplar",
                args(json!({
                    "prompt_id": "00000000-0000-0000-0000-000000000000",
                    "question": "q",
                    "answer": "a"
                })),
            )
            .await
            .unwrap_err();
        assert!(err.message.contains("Prompt not found"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected() {
        let server = FewShotServer::new(PromptService::in_memory());
        let err = server
            .dispatch("drop_tables", JsonObject::new())
            .await
            .unwrap_err();
        assert!(err.message.contains("unknown tool"));
    }

    #[tokio::test]
    async fn test_prompt_info_lists_exemplars() {
        let server = FewShotServer::new(PromptService::in_memory());
        let created = server
            .dispatch("add_prompt", args(json!({ "prefix": "Guess." })))
            .await
            .unwrap();
        let prompt_id = result_text(&created);
        server
            .dispatch(
                "add_exemplar",
                args(json!({ "prompt_id": prompt_id, "question": "q0", "answer": "a0" })),
            )
            .await
            .unwrap();

        let info = server
            .dispatch("get_prompt_info", args(json!({ "prompt_id": prompt_id })))
            .await
            .unwrap();
        let text = result_text(&info);
        assert!(text.contains("**Exemplar count:** 1"));
        assert!(text.contains("Q: q0"));
    }
}
