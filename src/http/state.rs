//! Shared state handed to every handler.

use crate::aggregation::{
    ports::Summarizer,
    services::{AggregationEngine, DigestService},
};
use crate::identity::{
    ports::UserRepository,
    services::{AccountService, SessionGuard},
};
use crate::oauth::{ports::TokenExchanger, services::OAuthExchangeFlow};
use crate::provider::ports::CredentialStore;
use crate::task::{ports::TaskRepository, services::TaskService};
use mockable::DefaultClock;
use std::sync::Arc;

/// Account service over a type-erased repository.
pub type AccountHandle = Arc<AccountService<dyn UserRepository, DefaultClock>>;

/// Task service over a type-erased repository.
pub type TaskHandle = Arc<TaskService<dyn TaskRepository, DefaultClock>>;

/// Aggregation engine over type-erased storage.
pub type EngineHandle = Arc<AggregationEngine<dyn TaskRepository, dyn CredentialStore>>;

/// Digest service over type-erased storage and summarizer.
pub type DigestHandle =
    Arc<DigestService<dyn TaskRepository, dyn CredentialStore, dyn Summarizer>>;

/// OAuth flow over a type-erased store and exchanger.
pub type OAuthHandle =
    Arc<OAuthExchangeFlow<dyn CredentialStore, dyn TokenExchanger, DefaultClock>>;

/// Cloneable handler state.
#[derive(Clone)]
pub struct AppState {
    pub(crate) guard: Arc<SessionGuard<DefaultClock>>,
    pub(crate) accounts: AccountHandle,
    pub(crate) tasks: TaskHandle,
    pub(crate) engine: EngineHandle,
    pub(crate) digest: Option<DigestHandle>,
    pub(crate) oauth: OAuthHandle,
    pub(crate) client_url: Arc<str>,
}

impl AppState {
    /// Creates state without a digest summarizer.
    ///
    /// `client_url` is the browser client that OAuth callbacks redirect to.
    #[must_use]
    pub fn new(
        guard: Arc<SessionGuard<DefaultClock>>,
        accounts: AccountHandle,
        tasks: TaskHandle,
        engine: EngineHandle,
        oauth: OAuthHandle,
        client_url: &str,
    ) -> Self {
        Self {
            guard,
            accounts,
            tasks,
            engine,
            digest: None,
            oauth,
            client_url: Arc::from(client_url.trim_end_matches('/')),
        }
    }

    /// Enables summaries on the digest route.
    #[must_use]
    pub fn with_digest(mut self, digest: DigestHandle) -> Self {
        self.digest = Some(digest);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("guard", &self.guard)
            .field("digest", &self.digest.is_some())
            .field("client_url", &self.client_url)
            .finish_non_exhaustive()
    }
}
