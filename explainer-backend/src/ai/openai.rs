use crate::ai::types::{AiError, AiResponse, ToolCall, ToolHistoryEntry, ToolResponse};
use crate::ai::{ChatBackend, Message};
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAICompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAIFunction,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: OpenAIFunctionCall,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIFunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAICompletionResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

impl OpenAIClient {
    pub fn new(
        api_key: &str,
        endpoint: &str,
        model: &str,
        max_tokens: Option<u32>,
    ) -> Result<Self, AiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let auth_value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| AiError::Api(format!("Invalid API key format: {}", e)))?;
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }

    async fn generate_with_tools_internal(
        &self,
        messages: Vec<Message>,
        tool_history: Vec<OpenAIMessage>,
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        let mut api_messages: Vec<OpenAIMessage> = messages
            .into_iter()
            .map(|m| OpenAIMessage {
                role: m.role.to_string(),
                content: Some(m.content),
                tool_calls: None,
                tool_call_id: None,
            })
            .collect();

        // Previous tool calls and results from this turn
        api_messages.extend(tool_history);

        let openai_tools: Option<Vec<OpenAITool>> = if tools.is_empty() {
            None
        } else {
            Some(
                tools
                    .iter()
                    .map(|t| OpenAITool {
                        tool_type: "function".to_string(),
                        function: OpenAIFunction {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: json!({
                                "type": t.input_schema.schema_type,
                                "properties": t.input_schema.properties.iter().map(|(k, v)| {
                                    (k.clone(), json!({
                                        "type": v.schema_type,
                                        "description": v.description
                                    }))
                                }).collect::<serde_json::Map<String, Value>>(),
                                "required": t.input_schema.required
                            }),
                        },
                    })
                    .collect(),
            )
        };

        let request = OpenAICompletionRequest {
            model: self.model.clone(),
            messages: api_messages,
            max_tokens: self.max_tokens,
            tools: openai_tools.clone(),
            tool_choice: if tools.is_empty() { None } else { Some("auto".to_string()) },
        };

        log::info!(
            "[OPENAI] Sending request to {} with model {} and {} tools",
            self.endpoint,
            self.model,
            openai_tools.as_ref().map(|t| t.len()).unwrap_or(0),
        );
        log::debug!(
            "[OPENAI] Full request:\n{}",
            serde_json::to_string_pretty(&request).unwrap_or_default()
        );

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                return Err(AiError::Api(error_response.error.message));
            }

            return Err(AiError::Api(format!(
                "status {}, body: {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        log::debug!("[OPENAI] Raw response:\n{}", response_text);

        let response_data: OpenAICompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| AiError::Parse(format!("{} - body: {}", e, response_text)))?;

        let choice = response_data.choices.first().ok_or(AiError::NoChoices)?;

        log::info!(
            "[OPENAI] Response - content_len: {}, tool_calls: {}, finish_reason: {:?}",
            choice.message.content.as_ref().map(|c| c.len()).unwrap_or(0),
            choice.message.tool_calls.as_ref().map(|t| t.len()).unwrap_or(0),
            choice.finish_reason
        );

        let content = choice.message.content.clone().unwrap_or_default();
        let finish_reason = choice.finish_reason.clone();

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .as_ref()
            .map(|calls| {
                calls
                    .iter()
                    .map(|tc| {
                        let args: Value = serde_json::from_str(&tc.function.arguments)
                            .unwrap_or(json!({}));
                        ToolCall {
                            id: tc.id.clone(),
                            name: tc.function.name.clone(),
                            arguments: args,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let is_tool_use = finish_reason.as_deref() == Some("tool_calls") || !tool_calls.is_empty();

        Ok(AiResponse {
            content,
            tool_calls,
            stop_reason: if is_tool_use {
                Some("tool_use".to_string())
            } else {
                Some("end_turn".to_string())
            },
        })
    }

    /// Build the assistant tool-call message plus tool result messages for
    /// continuing the conversation after tool execution
    pub fn build_tool_result_messages(
        tool_calls: &[ToolCall],
        tool_responses: &[ToolResponse],
    ) -> Vec<OpenAIMessage> {
        let mut messages = Vec::new();

        let openai_tool_calls: Vec<OpenAIToolCall> = tool_calls
            .iter()
            .map(|tc| OpenAIToolCall {
                id: tc.id.clone(),
                call_type: "function".to_string(),
                function: OpenAIFunctionCall {
                    name: tc.name.clone(),
                    arguments: serde_json::to_string(&tc.arguments).unwrap_or_default(),
                },
            })
            .collect();

        messages.push(OpenAIMessage {
            role: "assistant".to_string(),
            content: Some("".to_string()), // some providers require content even if empty
            tool_calls: Some(openai_tool_calls),
            tool_call_id: None,
        });

        for response in tool_responses {
            messages.push(OpenAIMessage {
                role: "tool".to_string(),
                content: Some(response.content.clone()),
                tool_calls: None,
                tool_call_id: Some(response.tool_call_id.clone()),
            });
        }

        messages
    }

    fn tool_history_to_openai(history: &[ToolHistoryEntry]) -> Vec<OpenAIMessage> {
        let mut messages = Vec::new();
        for entry in history {
            messages.extend(Self::build_tool_result_messages(
                &entry.tool_calls,
                &entry.tool_responses,
            ));
        }
        messages
    }
}

#[async_trait]
impl ChatBackend for OpenAIClient {
    async fn complete(
        &self,
        messages: Vec<Message>,
        tool_history: Vec<ToolHistoryEntry>,
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        let tool_messages = Self::tool_history_to_openai(&tool_history);
        self.generate_with_tools_internal(messages, tool_messages, tools)
            .await
    }
}
