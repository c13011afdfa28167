use anyhow::Context;
use tracing::debug;

use crate::models::{chat_completions::CHAT_COMPLETIONS_PATH, Models};

use super::{ChatCompletionRequest, ChatCompletionResponse, ChatCompletions};

impl ChatCompletions for Models {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> anyhow::Result<ChatCompletionResponse> {
        debug!(task = "chat completion", model = %request.model);

        let text = self
            .string_response(&request, CHAT_COMPLETIONS_PATH)
            .await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}
