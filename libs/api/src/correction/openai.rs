use std::time::Duration;

use async_trait::async_trait;
use llm::models::{
    chat_completions::{
        ChatCompletionRequest, ChatCompletionResponse, ChatCompletions,
        ChatMessage, FunctionDefinition, Role, Tool, ToolChoice,
    },
    Models,
};

use super::{
    prompt::{persona, user_message},
    provider::parse_result,
    schema::{correction_schema, FUNCTION_DESCRIPTION, FUNCTION_NAME},
    CorrectionProvider, CorrectionResult, ProviderError,
};
use crate::OpenAiConfig;

/// Primary provider: answers through a forced function call whose
/// arguments follow the correction schema.
#[derive(Debug)]
pub struct OpenAiProvider {
    models: Option<Models>,
    model: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(
        config: &OpenAiConfig,
        api_key: Option<&str>,
    ) -> anyhow::Result<Self> {
        let models = api_key
            .map(|key| {
                Models::openai(
                    &config.base_url,
                    key,
                    Duration::from_secs(config.timeout_secs),
                )
            })
            .transpose()?;

        Ok(Self {
            models,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn request(&self, text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: persona(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_message(text),
                },
            ],
            tools: vec![Tool::function(FunctionDefinition {
                name: FUNCTION_NAME.to_string(),
                description: FUNCTION_DESCRIPTION.to_string(),
                parameters: correction_schema(),
            })],
            tool_choice: Some(ToolChoice::function(FUNCTION_NAME)),
            temperature: Some(self.temperature),
        }
    }
}

#[async_trait]
impl CorrectionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn check(&self, text: &str) -> Result<CorrectionResult, ProviderError> {
        let Some(models) = &self.models else {
            return Err(ProviderError::Configuration(
                "OpenAI API key is not configured".to_string(),
            ));
        };

        let response = models
            .chat_completion(self.request(text))
            .await
            .map_err(ProviderError::Call)?;

        decode(&response)
    }
}

fn decode(
    response: &ChatCompletionResponse,
) -> Result<CorrectionResult, ProviderError> {
    let Some(arguments) = response.first_tool_arguments() else {
        return Err(ProviderError::ResponseFormat(
            "unexpected response format from OpenAI".to_string(),
        ));
    };

    parse_result(arguments, "OpenAI")
}

#[cfg(test)]
mod test {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::correction::ErrorKind;

    fn config(base_url: String) -> OpenAiConfig {
        OpenAiConfig {
            base_url,
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            timeout_secs: 5,
        }
    }

    fn tool_call_body(arguments: &str) -> serde_json::Value {
        json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": FUNCTION_NAME,
                            "arguments": arguments
                        }
                    }]
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_check_decodes_function_arguments() {
        // Arrange
        let server = MockServer::start_async().await;
        let arguments = json!({
            "hasErrors": true,
            "correctedText": "the cat sat on the mat",
            "errors": [
                { "original": "teh", "correction": "the", "type": "spelling", "explanation": "Spelled 'the'." },
                { "original": "teh", "correction": "the", "type": "spelling", "explanation": "Spelled 'the'." }
            ],
            "feedback": "Nice story!"
        })
        .to_string();
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer sk-test");
                then.status(200).json_body(tool_call_body(&arguments));
            })
            .await;
        let provider =
            OpenAiProvider::new(&config(server.base_url()), Some("sk-test"))
                .unwrap();

        // Act
        let result = provider.check("teh cat sat on teh mat").await;

        // Assert
        mock.assert_async().await;
        let result = result.unwrap();
        assert!(result.has_errors);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[1].kind, ErrorKind::Spelling);
    }

    #[tokio::test]
    async fn test_check_without_key_is_configuration_error() {
        let provider =
            OpenAiProvider::new(&config("http://127.0.0.1:1".to_string()), None)
                .unwrap();

        let err = provider.check("hello").await.unwrap_err();

        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_check_http_failure_is_call_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(500).body("boom");
            })
            .await;
        let provider =
            OpenAiProvider::new(&config(server.base_url()), Some("sk-test"))
                .unwrap();

        let err = provider.check("hello").await.unwrap_err();

        assert!(matches!(err, ProviderError::Call(_)));
    }

    #[tokio::test]
    async fn test_check_missing_tool_call_is_format_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "content": "Looks good!" } }]
                }));
            })
            .await;
        let provider =
            OpenAiProvider::new(&config(server.base_url()), Some("sk-test"))
                .unwrap();

        let err = provider.check("hello").await.unwrap_err();

        assert!(matches!(err, ProviderError::ResponseFormat(_)));
    }

    #[tokio::test]
    async fn test_check_malformed_arguments_is_format_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200)
                    .json_body(tool_call_body("{\"hasErrors\": tru"));
            })
            .await;
        let provider =
            OpenAiProvider::new(&config(server.base_url()), Some("sk-test"))
                .unwrap();

        let err = provider.check("hello").await.unwrap_err();

        assert!(err.to_string().contains("failed to parse OpenAI response"));
    }

    #[test]
    fn test_request_forces_correction_function() {
        let provider =
            OpenAiProvider::new(&config("http://localhost".to_string()), None)
                .unwrap();

        let body = serde_json::to_value(provider.request("teh cat")).unwrap();

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][1]["content"],
            "Please check the following text: \"teh cat\""
        );
        assert_eq!(body["tools"][0]["function"]["name"], FUNCTION_NAME);
        assert_eq!(body["tool_choice"]["function"]["name"], FUNCTION_NAME);
    }
}
