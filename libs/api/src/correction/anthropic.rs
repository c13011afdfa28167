use std::time::Duration;

use async_trait::async_trait;
use llm::models::{
    messages::{Message, MessageRequest, MessageResponse, Messages, Role},
    Models,
};

use super::{
    prompt::{persona, user_message, JSON_FORMAT},
    provider::parse_result,
    CorrectionProvider, CorrectionResult, ProviderError,
};
use crate::AnthropicConfig;

/// Secondary provider: answers with one text block that must be JSON.
#[derive(Debug)]
pub struct AnthropicProvider {
    models: Option<Models>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(
        config: &AnthropicConfig,
        api_key: Option<&str>,
    ) -> anyhow::Result<Self> {
        let models = api_key
            .map(|key| {
                Models::anthropic(
                    &config.base_url,
                    key,
                    &config.version,
                    Duration::from_secs(config.timeout_secs),
                )
            })
            .transpose()?;

        Ok(Self {
            models,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn request(&self, text: &str) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: Some(format!("{}\n\n{}", persona(), JSON_FORMAT)),
            messages: vec![Message {
                role: Role::User,
                content: user_message(text),
            }],
            temperature: Some(self.temperature),
        }
    }
}

#[async_trait]
impl CorrectionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Claude"
    }

    async fn check(&self, text: &str) -> Result<CorrectionResult, ProviderError> {
        let Some(models) = &self.models else {
            return Err(ProviderError::Configuration(
                "Anthropic API key is not configured".to_string(),
            ));
        };

        let response = models
            .create_message(self.request(text))
            .await
            .map_err(ProviderError::Call)?;

        decode(&response)
    }
}

fn decode(response: &MessageResponse) -> Result<CorrectionResult, ProviderError> {
    let Some(text) = response.first_text() else {
        return Err(ProviderError::ResponseFormat(
            "unexpected response format from Claude".to_string(),
        ));
    };

    parse_result(text, "Claude")
}
