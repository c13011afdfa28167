use anyhow::Context;
use tracing::debug;

use crate::models::{messages::MESSAGES_PATH, Models};

use super::{MessageRequest, MessageResponse, Messages};

impl Messages for Models {
    async fn create_message(
        &self,
        request: MessageRequest,
    ) -> anyhow::Result<MessageResponse> {
        debug!(task = "create message", model = %request.model);

        let text = self.string_response(&request, MESSAGES_PATH).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}
