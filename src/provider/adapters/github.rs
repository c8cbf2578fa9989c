//! Issue tracker adapter backed by the GitHub REST API.

use super::http::send_json;
use crate::provider::{
    domain::{AccessToken, ProviderError, ProviderKind, ProviderResult},
    ports::ProviderAdapter,
};
use crate::task::domain::{Priority, TaskView};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::debug;

/// Default GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const ACCEPT: &str = "application/vnd.github+json";

/// Fetches assigned issues and authored open pull requests.
///
/// Issues are reported with [`Priority::High`] and pull requests with
/// [`Priority::Medium`]; the two lists are fetched concurrently and merged as
/// all issues followed by all pull requests. Pull requests assigned to the
/// user appear only in the pull request list.
#[derive(Debug, Clone)]
pub struct GitHubAdapter {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct Issue {
    title: String,
    html_url: String,
    /// Present when the issue is a pull request.
    #[serde(default)]
    pull_request: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    items: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
}

impl GitHubAdapter {
    /// Creates an adapter using `client` against `api_base`.
    #[must_use]
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
        }
    }

    fn get(&self, path: &str, token: &AccessToken) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.api_base))
            .header(reqwest::header::AUTHORIZATION, format!("token {}", token.expose()))
            .header(reqwest::header::ACCEPT, ACCEPT)
    }

    async fn login(&self, token: &AccessToken) -> ProviderResult<String> {
        let account: Account = send_json(ProviderKind::Tracker, self.get("/user", token)).await?;
        Ok(account.login)
    }

    /// Assigned issues, excluding pull requests, which GitHub lists here too.
    async fn assigned_issues(&self, token: &AccessToken) -> ProviderResult<Vec<Issue>> {
        let assigned: Vec<Issue> = send_json(
            ProviderKind::Tracker,
            self.get("/issues", token).query(&[("filter", "assigned")]),
        )
        .await?;
        Ok(assigned
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .collect())
    }

    async fn open_pull_requests(
        &self,
        token: &AccessToken,
        login: &str,
    ) -> ProviderResult<Vec<Issue>> {
        let query = format!("author:{login} type:pr state:open");
        let results: SearchResults = send_json(
            ProviderKind::Tracker,
            self.get("/search/issues", token).query(&[("q", query.as_str())]),
        )
        .await?;
        Ok(results.items)
    }
}

#[async_trait]
impl ProviderAdapter for GitHubAdapter {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Tracker
    }

    async fn fetch(
        &self,
        token: &AccessToken,
        identity_hint: Option<&str>,
    ) -> ProviderResult<Vec<TaskView>> {
        let login = match identity_hint {
            Some(hint) => hint.to_owned(),
            None => self.login(token).await?,
        };
        if login.trim().is_empty() {
            return Err(ProviderError::malformed(
                ProviderKind::Tracker,
                "account login is empty",
            ));
        }

        let (issue_result, pull_result) = tokio::join!(
            self.assigned_issues(token),
            self.open_pull_requests(token, &login)
        );
        let issues = issue_result?;
        let pulls = pull_result?;
        debug!(issues = issues.len(), pulls = pulls.len(), "fetched tracker items");

        let source = ProviderKind::Tracker.task_source();
        let issue_views = issues
            .into_iter()
            .map(|issue| TaskView::new(source, issue.title, Priority::High).with_url(issue.html_url));
        let pull_views = pulls.into_iter().map(|pull| {
            TaskView::new(source, format!("PR: {}", pull.title), Priority::Medium)
                .with_url(pull.html_url)
        });
        Ok(issue_views.chain(pull_views).collect())
    }
}
