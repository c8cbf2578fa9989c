//! Summarizer backed by the Anthropic Messages API.

use crate::aggregation::{domain::SummarizerError, ports::Summarizer};
use crate::provider::adapters::http::describe_transport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Anthropic API base URL.
pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

/// Default model used for digests.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-latest";

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 512;

/// Anthropic API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps an API key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Sends one single-turn Messages request per summary.
#[derive(Debug, Clone)]
pub struct AnthropicSummarizer {
    client: reqwest::Client,
    api_base: String,
    api_key: ApiKey,
    model: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicSummarizer {
    /// Creates a summarizer using `client` against `api_base`.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        api_key: ApiKey,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            api_key,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Summarizer for AnthropicSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .client
            .post(format!("{}/v1/messages", self.api_base))
            .header("x-api-key", &self.api_key.0)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|err| SummarizerError::Unavailable(describe_transport(&err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizerError::Rejected(status.as_u16()));
        }
        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|err| SummarizerError::Malformed(err.to_string()))?;

        let text = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");
        let summary = text.trim();
        if summary.is_empty() {
            return Err(SummarizerError::Malformed("no text content".to_owned()));
        }
        Ok(summary.to_owned())
    }
}
