pub mod implementation;

use serde::{Deserialize, Serialize};

static CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

pub trait ChatCompletions {
    fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<ChatCompletionResponse>>
           + Send;
}

#[derive(Debug, Serialize, Default)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub r#type: String,
    pub function: FunctionDefinition,
}

impl Tool {
    pub fn function(function: FunctionDefinition) -> Self {
        Self {
            r#type: "function".to_string(),
            function,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments.
    pub parameters: serde_json::Value,
}

/// Forces the model to call the named function.
#[derive(Debug, Serialize)]
pub struct ToolChoice {
    pub r#type: String,
    pub function: FunctionName,
}

impl ToolChoice {
    pub fn function(name: &str) -> Self {
        Self {
            r#type: "function".to_string(),
            function: FunctionName {
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FunctionName {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub id: Option<String>,
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments as a JSON encoded string, exactly as the model produced them.
    pub arguments: String,
}

impl ChatCompletionResponse {
    /// Arguments of the first tool call of the first choice.
    pub fn first_tool_arguments(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .tool_calls
            .first()
            .map(|call| call.function.arguments.as_str())
    }
}
