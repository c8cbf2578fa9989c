//! Chat adapter backed by the Slack Web API.

use super::http::send_json;
use crate::provider::{
    domain::{AccessToken, ProviderError, ProviderKind, ProviderResult},
    ports::ProviderAdapter,
};
use crate::task::domain::{Priority, TaskView};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Default Slack Web API base URL.
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Maximum number of channel messages reported per fetch.
pub const CHAT_HISTORY_LIMIT: usize = 10;

/// Slack error codes meaning the token itself is no longer usable.
const AUTH_ERROR_CODES: [&str; 5] = [
    "invalid_auth",
    "not_authed",
    "token_revoked",
    "token_expired",
    "account_inactive",
];

/// Fetches the most recent messages of one configured channel.
///
/// Slack reports API failures in the body (`ok: false`) rather than through
/// the HTTP status, so those are classified here from the error code.
#[derive(Debug, Clone)]
pub struct SlackAdapter {
    client: reqwest::Client,
    api_base: String,
    channel: String,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    text: String,
}

impl SlackAdapter {
    /// Creates an adapter reading `channel` using `client` against `api_base`.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            channel: channel.into(),
        }
    }
}

fn classify_error_code(code: Option<&str>) -> ProviderError {
    match code {
        Some(value) if AUTH_ERROR_CODES.contains(&value) => ProviderError::AuthInvalid {
            provider: ProviderKind::Chat,
        },
        Some(value) => ProviderError::unavailable(ProviderKind::Chat, format!("slack error {value}")),
        None => ProviderError::unavailable(ProviderKind::Chat, "slack error without code"),
    }
}

#[async_trait]
impl ProviderAdapter for SlackAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Chat
    }

    async fn fetch(
        &self,
        token: &AccessToken,
        _identity_hint: Option<&str>,
    ) -> ProviderResult<Vec<TaskView>> {
        let limit = CHAT_HISTORY_LIMIT.to_string();
        let history: HistoryResponse = send_json(
            ProviderKind::Chat,
            self.client
                .get(format!("{}/conversations.history", self.api_base))
                .bearer_auth(token.expose())
                .query(&[("channel", self.channel.as_str()), ("limit", limit.as_str())]),
        )
        .await?;

        if !history.ok {
            return Err(classify_error_code(history.error.as_deref()));
        }
        let messages = history.messages.ok_or_else(|| {
            ProviderError::malformed(ProviderKind::Chat, "missing field `messages`")
        })?;
        debug!(messages = messages.len(), "fetched chat items");

        let source = ProviderKind::Chat.task_source();
        Ok(messages
            .into_iter()
            .take(CHAT_HISTORY_LIMIT)
            .map(|message| TaskView::new(source, message.text, Priority::Medium))
            .collect())
    }
}
