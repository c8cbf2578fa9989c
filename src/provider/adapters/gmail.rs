//! Mailbox adapter backed by the Gmail REST API.

use super::http::send_json;
use crate::provider::{
    domain::{AccessToken, ProviderKind, ProviderResult},
    ports::ProviderAdapter,
};
use crate::task::domain::{Priority, TaskView};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

/// Default Google API base URL.
pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com";

/// Search filter selecting messages that still need attention.
pub const MAILBOX_QUERY: &str = "is:unread OR label:STARRED";

/// Maximum number of messages listed per fetch.
pub const MAILBOX_PAGE_SIZE: usize = 10;

/// Title used when a message has no subject header.
pub const NO_SUBJECT: &str = "(no subject)";

/// Web mailbox link prefix for message URLs.
///
/// `/u/0/` selects the first Google account signed in to the browser, which
/// is not necessarily the linked one.
const WEB_MAILBOX_BASE: &str = "https://mail.google.com/mail/u/0/#all";

/// Fetches unread or starred messages as low-priority tasks.
///
/// Message URLs open in the browser's first signed-in Google account. When
/// several accounts are signed in, the link may open a mailbox other than
/// the linked one.
#[derive(Debug, Clone)]
pub struct GmailAdapter {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    id: String,
    #[serde(default)]
    thread_id: Option<String>,
    #[serde(default)]
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    headers: Vec<Header>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

impl Message {
    fn subject(&self) -> Option<&str> {
        self.payload
            .as_ref()?
            .headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case("subject"))
            .map(|header| header.value.trim())
            .filter(|value| !value.is_empty())
    }

    fn web_url(&self) -> String {
        let anchor = self.thread_id.as_deref().unwrap_or(&self.id);
        format!("{WEB_MAILBOX_BASE}/{anchor}")
    }
}

impl GmailAdapter {
    /// Creates an adapter using `client` against `api_base`.
    #[must_use]
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/gmail/v1/users/me/messages", self.api_base)
    }

    async fn list(&self, token: &AccessToken) -> ProviderResult<Vec<MessageRef>> {
        let page_size = MAILBOX_PAGE_SIZE.to_string();
        let list: MessageList = send_json(
            ProviderKind::Mailbox,
            self.client
                .get(self.messages_url())
                .bearer_auth(token.expose())
                .query(&[("q", MAILBOX_QUERY), ("maxResults", page_size.as_str())]),
        )
        .await?;
        Ok(list.messages)
    }

    async fn metadata(&self, token: &AccessToken, id: &str) -> ProviderResult<Message> {
        send_json(
            ProviderKind::Mailbox,
            self.client
                .get(format!("{}/{id}", self.messages_url()))
                .bearer_auth(token.expose())
                .query(&[("format", "metadata"), ("metadataHeaders", "Subject")]),
        )
        .await
    }
}

#[async_trait]
impl ProviderAdapter for GmailAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Mailbox
    }

    async fn fetch(
        &self,
        token: &AccessToken,
        _identity_hint: Option<&str>,
    ) -> ProviderResult<Vec<TaskView>> {
        let listed = self.list(token).await?;
        let capped = listed.iter().take(MAILBOX_PAGE_SIZE);
        let messages =
            try_join_all(capped.map(|message| self.metadata(token, &message.id))).await?;
        debug!(messages = messages.len(), "fetched mailbox items");

        let source = ProviderKind::Mailbox.task_source();
        Ok(messages
            .iter()
            .map(|message| {
                TaskView::new(source, message.subject().unwrap_or(NO_SUBJECT), Priority::Low)
                    .with_url(message.web_url())
            })
            .collect())
    }
}
