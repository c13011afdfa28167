use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    prompt::sanitize, CorrectionProvider, CorrectionResult, ProviderError,
};

/// Tries the primary provider, then the secondary once if it fails.
#[derive(Clone)]
pub struct Gateway {
    primary: Arc<dyn CorrectionProvider>,
    secondary: Arc<dyn CorrectionProvider>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("Please provide some text to check.")]
    Validation,
    #[error("{0} service is not properly configured.")]
    SecondaryMisconfigured(String),
    #[error("Both grammar checking services are currently unavailable.")]
    Unavailable,
}

impl Gateway {
    pub fn new(
        primary: Arc<dyn CorrectionProvider>,
        secondary: Arc<dyn CorrectionProvider>,
    ) -> Self {
        Self { primary, secondary }
    }

    pub fn providers(&self) -> [&str; 2] {
        [self.primary.name(), self.secondary.name()]
    }

    pub async fn check(&self, text: &str) -> Result<CorrectionResult, CheckError> {
        let text = sanitize(text);
        if text.trim().is_empty() {
            return Err(CheckError::Validation);
        }

        let chars = text.chars().count();

        let err = match self.primary.check(&text).await {
            Ok(result) => return Ok(self.answered(&*self.primary, result, chars)),
            Err(err) => err,
        };
        warn!(
            task = "check",
            provider = self.primary.name(),
            chars,
            err = %err,
            "primary provider failed, falling back"
        );

        match self.secondary.check(&text).await {
            Ok(result) => Ok(self.answered(&*self.secondary, result, chars)),
            Err(err) => {
                error!(
                    task = "check",
                    provider = self.secondary.name(),
                    chars,
                    err = %err,
                    "secondary provider failed"
                );
                match err {
                    ProviderError::Configuration(_) => {
                        Err(CheckError::SecondaryMisconfigured(
                            self.secondary.name().to_string(),
                        ))
                    }
                    ProviderError::Call(_) | ProviderError::ResponseFormat(_) => {
                        Err(CheckError::Unavailable)
                    }
                }
            }
        }
    }

    fn answered(
        &self,
        provider: &dyn CorrectionProvider,
        mut result: CorrectionResult,
        chars: usize,
    ) -> CorrectionResult {
        let dropped = result.drop_existing_break_errors();
        if dropped > 0 {
            warn!(
                task = "check",
                provider = provider.name(),
                dropped,
                "dropped paragraph errors on existing breaks"
            );
        }

        info!(
            task = "check",
            provider = provider.name(),
            chars,
            errors = result.errors.len(),
        );

        result
    }
}
