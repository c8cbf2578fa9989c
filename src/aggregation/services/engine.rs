//! Concurrent fan-out across linked providers with partial-failure tolerance.

use crate::aggregation::domain::{
    AggregateView, AggregationResult, ProviderOutcome, ProviderStatus,
};
use crate::identity::domain::UserId;
use crate::provider::{
    domain::{ProviderError, ProviderKind, ProviderLink, ProviderResult},
    ports::CredentialStore,
    services::ProviderRegistry,
};
use crate::task::{domain::TaskView, ports::TaskRepository};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on one adapter call, including all of its requests.
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the unified task list for one user.
///
/// The local task read runs concurrently with the credential read and the
/// provider calls that follow it, so latency is bounded by the slowest
/// single source. Output order never depends on completion order.
pub struct AggregationEngine<T, S>
where
    T: TaskRepository + ?Sized,
    S: CredentialStore + ?Sized,
{
    tasks: Arc<T>,
    credentials: Arc<S>,
    registry: ProviderRegistry,
    adapter_timeout: Duration,
}

impl<T, S> AggregationEngine<T, S>
where
    T: TaskRepository + ?Sized,
    S: CredentialStore + ?Sized,
{
    /// Creates an engine using [`DEFAULT_ADAPTER_TIMEOUT`].
    #[must_use]
    pub const fn new(tasks: Arc<T>, credentials: Arc<S>, registry: ProviderRegistry) -> Self {
        Self {
            tasks,
            credentials,
            registry,
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
        }
    }

    /// Overrides the per-adapter timeout.
    #[must_use]
    pub const fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    /// Returns local tasks followed by tracker, mailbox and chat items.
    ///
    /// # Errors
    ///
    /// Returns [`crate::aggregation::domain::AggregationError::StorageUnavailable`]
    /// when local tasks or provider links cannot be read. Provider failures
    /// are reported in the returned view instead.
    pub async fn aggregate(&self, user: UserId) -> AggregationResult<AggregateView> {
        let (local_result, remote_result) =
            tokio::join!(self.tasks.list_by_owner(user), self.fetch_linked(user));
        let local = local_result?;
        let mut remote = remote_result?;

        let mut tasks: Vec<TaskView> = local.iter().map(|task| task.to_view()).collect();
        let mut providers = Vec::with_capacity(ProviderKind::ALL.len());
        for provider in ProviderKind::ALL {
            let outcome = match remote.remove(&provider) {
                None => ProviderOutcome::NotLinked,
                Some(Ok(items)) => {
                    let count = items.len();
                    tasks.extend(items);
                    ProviderOutcome::Fetched { count }
                }
                Some(Err(err)) => {
                    warn!(
                        user_id = %user,
                        provider = %provider,
                        kind = %err.kind(),
                        error = %err,
                        "provider fetch failed"
                    );
                    ProviderOutcome::Failed { kind: err.kind() }
                }
            };
            providers.push(ProviderStatus { provider, outcome });
        }

        debug!(user_id = %user, tasks = tasks.len(), "aggregated task view");
        Ok(AggregateView::new(tasks, providers))
    }

    async fn fetch_linked(
        &self,
        user: UserId,
    ) -> AggregationResult<BTreeMap<ProviderKind, ProviderResult<Vec<TaskView>>>> {
        let links = self.credentials.links(user).await?;
        let results = join_all(links.iter().map(|link| self.fetch_one(link))).await;
        Ok(links
            .iter()
            .map(ProviderLink::provider)
            .zip(results)
            .collect())
    }

    async fn fetch_one(&self, link: &ProviderLink) -> ProviderResult<Vec<TaskView>> {
        let provider = link.provider();
        let Some(adapter) = self.registry.get(provider) else {
            return Err(ProviderError::unavailable(provider, "no adapter registered"));
        };
        tokio::time::timeout(
            self.adapter_timeout,
            adapter.fetch(link.access_token(), link.account_hint()),
        )
        .await
        .unwrap_or_else(|_| Err(ProviderError::unavailable(provider, "adapter timed out")))
    }
}
