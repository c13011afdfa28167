use std::time::Duration;

use anyhow::{ensure, Context};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use serde::Serialize;

pub mod chat_completions;
pub mod messages;

/// HTTP client bound to one provider's base url and credentials.
#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    client: Client,
}

impl Models {
    /// Client for an OpenAI-style API authenticated with a bearer token.
    pub fn openai(
        base_url: &str,
        token: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .context("invalid openai token")?,
        );

        Self::with_headers(base_url, headers, timeout)
    }

    /// Client for an Anthropic-style API authenticated with `x-api-key`.
    pub fn anthropic(
        base_url: &str,
        api_key: &str,
        version: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).context("invalid anthropic key")?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(version)
                .context("invalid anthropic version")?,
        );

        Self::with_headers(base_url, headers, timeout)
    }

    fn with_headers(
        base_url: &str,
        headers: HeaderMap,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn string_response<R: Serialize>(
        &self,
        request: &R,
        path: &str,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .json(request)
            .send()
            .await
            .with_context(|| format!("failed to call {}", path))?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        text.context("failed to read response body")
    }
}
