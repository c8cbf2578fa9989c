//! Stub providers and fixtures shared by aggregation tests.

use std::sync::Arc;
use std::time::Duration;

use crate::identity::domain::UserId;
use crate::provider::{
    adapters::memory::InMemoryCredentialStore,
    domain::{AccessToken, ProviderError, ProviderKind, ProviderLink, ProviderResult},
    ports::{CredentialStore, ProviderAdapter},
    services::ProviderRegistry,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Priority, Task, TaskView},
    ports::TaskRepository,
};
use async_trait::async_trait;
use mockable::DefaultClock;

/// Adapter returning a canned result after a fixed delay.
pub(super) struct StubAdapter {
    provider: ProviderKind,
    delay: Duration,
    result: ProviderResult<Vec<TaskView>>,
}

impl StubAdapter {
    pub(super) fn items(provider: ProviderKind, titles: &[&str], delay: Duration) -> Arc<Self> {
        let source = provider.task_source();
        Arc::new(Self {
            provider,
            delay,
            result: Ok(titles
                .iter()
                .map(|title| TaskView::new(source, *title, Priority::Medium))
                .collect()),
        })
    }

    pub(super) fn failing(provider: ProviderKind, error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            provider,
            delay: Duration::ZERO,
            result: Err(error),
        })
    }
}

#[async_trait]
impl ProviderAdapter for StubAdapter {
    fn provider(&self) -> ProviderKind {
        self.provider
    }

    async fn fetch(
        &self,
        _token: &AccessToken,
        _identity_hint: Option<&str>,
    ) -> ProviderResult<Vec<TaskView>> {
        tokio::time::sleep(self.delay).await;
        self.result.clone()
    }
}

/// Storage seeded for one user.
pub(super) struct Seeded {
    pub(super) user: UserId,
    pub(super) tasks: Arc<InMemoryTaskRepository>,
    pub(super) credentials: Arc<InMemoryCredentialStore>,
}

pub(super) async fn seeded(local_titles: &[&str], linked: &[ProviderKind]) -> Seeded {
    let user = UserId::new();
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    for title in local_titles {
        let task =
            Task::new(user, *title, Priority::Low, "", &DefaultClock).expect("valid task");
        tasks.store(&task).await.expect("store succeeds");
    }
    for provider in linked {
        let token = AccessToken::new(format!("{provider}-token")).expect("non-empty token");
        credentials
            .set(user, &ProviderLink::new(*provider, token, &DefaultClock))
            .await
            .expect("link succeeds");
    }
    Seeded {
        user,
        tasks,
        credentials,
    }
}

pub(super) fn registry(adapters: Vec<Arc<StubAdapter>>) -> ProviderRegistry {
    adapters
        .into_iter()
        .fold(ProviderRegistry::new(), |registry, adapter| {
            registry.with_adapter(adapter)
        })
}

pub(super) fn titles(tasks: &[TaskView]) -> Vec<&str> {
    tasks.iter().map(TaskView::title).collect()
}
