//! Shared AI response and tool-call types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("AI API error: {0}")]
    Api(String),
    #[error("AI API returned no choices")]
    NoChoices,
    #[error("failed to parse AI response: {0}")]
    Parse(String),
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// Result of executing a tool, fed back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub tool_call_id: String,
    pub content: String,
}

/// One round of tool calls and their responses within a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolHistoryEntry {
    pub tool_calls: Vec<ToolCall>,
    pub tool_responses: Vec<ToolResponse>,
}

impl ToolHistoryEntry {
    pub fn new(tool_calls: Vec<ToolCall>, tool_responses: Vec<ToolResponse>) -> Self {
        Self { tool_calls, tool_responses }
    }
}

/// Parsed model response
#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub stop_reason: Option<String>,
}

impl AiResponse {
    /// Plain text answer with no tool use (test fixture)
    #[cfg(test)]
    pub fn text(content: impl Into<String>) -> Self {
        AiResponse {
            content: content.into(),
            tool_calls: vec![],
            stop_reason: Some("end_turn".to_string()),
        }
    }

    pub fn is_tool_use(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
