use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use anyhow::anyhow;
use async_trait::async_trait;

use super::{CorrectionProvider, CorrectionResult, ProviderError};

pub(crate) enum Outcome {
    /// Reports no errors and returns the received text unchanged.
    Echo,
    Result(CorrectionResult),
    CallError,
    FormatError,
    Misconfigured,
}

/// In-process provider that counts calls and records what it received.
pub(crate) struct FakeProvider {
    name: &'static str,
    outcome: Outcome,
    calls: AtomicUsize,
    received: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub(crate) fn new(name: &'static str, outcome: Outcome) -> Self {
        Self {
            name,
            outcome,
            calls: AtomicUsize::new(0),
            received: Mutex::new(vec![]),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl CorrectionProvider for FakeProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, text: &str) -> Result<CorrectionResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(text.to_string());

        match &self.outcome {
            Outcome::Echo => Ok(CorrectionResult {
                has_errors: false,
                corrected_text: text.to_string(),
                errors: vec![],
                feedback: "Great job!".to_string(),
            }),
            Outcome::Result(result) => Ok(result.clone()),
            Outcome::CallError => {
                Err(ProviderError::Call(anyhow!("connection refused")))
            }
            Outcome::FormatError => Err(ProviderError::ResponseFormat(
                format!("unexpected response format from {}", self.name),
            )),
            Outcome::Misconfigured => Err(ProviderError::Configuration(
                format!("{} API key is not configured", self.name),
            )),
        }
    }
}
