use async_trait::async_trait;

use super::CorrectionResult;

/// An external service able to review a submission.
#[async_trait]
pub trait CorrectionProvider: Send + Sync {
    /// Name shown to users and in logs.
    fn name(&self) -> &str;

    /// `text` is already sanitized.
    async fn check(&self, text: &str) -> Result<CorrectionResult, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Configuration(String),
    #[error("provider call failed: {0:#}")]
    Call(#[source] anyhow::Error),
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),
}

/// Parses a JSON payload that should hold a `CorrectionResult`.
pub(crate) fn parse_result(
    payload: &str,
    provider: &str,
) -> Result<CorrectionResult, ProviderError> {
    serde_json::from_str(payload).map_err(|e| {
        ProviderError::ResponseFormat(format!(
            "failed to parse {} response: {}",
            provider, e
        ))
    })
}
