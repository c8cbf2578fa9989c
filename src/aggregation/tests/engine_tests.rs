//! Aggregation engine ordering, concurrency and failure-isolation tests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::support::{StubAdapter, registry, seeded, titles};
use crate::aggregation::{
    domain::{AggregationError, ProviderOutcome},
    services::AggregationEngine,
};
use crate::identity::domain::UserId;
use crate::provider::{
    adapters::memory::InMemoryCredentialStore,
    domain::{ProviderError, ProviderFailureKind, ProviderKind, ProviderLink},
    ports::{CredentialStore, CredentialStoreError, CredentialStoreResult},
    services::ProviderRegistry,
};
use crate::task::{adapters::memory::InMemoryTaskRepository, domain::TaskSource};
use async_trait::async_trait;
use mockall::mock;
use rstest::rstest;

mock! {
    Credentials {}

    #[async_trait]
    impl CredentialStore for Credentials {
        async fn get(
            &self,
            user: UserId,
            provider: ProviderKind,
        ) -> CredentialStoreResult<Option<ProviderLink>>;
        async fn set(&self, user: UserId, link: &ProviderLink) -> CredentialStoreResult<()>;
        async fn remove(&self, user: UserId, provider: ProviderKind) -> CredentialStoreResult<bool>;
        async fn links(&self, user: UserId) -> CredentialStoreResult<Vec<ProviderLink>>;
    }
}

const ALL_LINKED: [ProviderKind; 3] = ProviderKind::ALL;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn zero_links_yield_local_tasks_in_creation_order() {
    let seeded = seeded(&["first", "second", "third"], &[]).await;
    let engine = AggregationEngine::new(seeded.tasks, seeded.credentials, ProviderRegistry::new());

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert_eq!(titles(view.tasks()), ["first", "second", "third"]);
    assert!(view.tasks().iter().all(|task| task.source() == TaskSource::Local));
    assert!(
        view.providers()
            .iter()
            .all(|status| status.outcome == ProviderOutcome::NotLinked)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merge_order_ignores_completion_order() {
    let seeded = seeded(&["A"], &ALL_LINKED).await;
    let engine = AggregationEngine::new(
        seeded.tasks,
        seeded.credentials,
        registry(vec![
            StubAdapter::items(ProviderKind::Tracker, &["B", "C"], Duration::from_millis(120)),
            StubAdapter::items(ProviderKind::Mailbox, &["D"], Duration::from_millis(60)),
            StubAdapter::items(ProviderKind::Chat, &["E"], Duration::ZERO),
        ]),
    );

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert_eq!(titles(view.tasks()), ["A", "B", "C", "D", "E"]);
    assert_eq!(
        view.status(ProviderKind::Tracker),
        Some(ProviderOutcome::Fetched { count: 2 })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn providers_are_called_concurrently() {
    let delay = Duration::from_millis(300);
    let seeded = seeded(&[], &ALL_LINKED).await;
    let engine = AggregationEngine::new(
        seeded.tasks,
        seeded.credentials,
        registry(vec![
            StubAdapter::items(ProviderKind::Tracker, &["t"], delay),
            StubAdapter::items(ProviderKind::Mailbox, &["m"], delay),
            StubAdapter::items(ProviderKind::Chat, &["c"], delay),
        ]),
    );

    let started = Instant::now();
    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert_eq!(view.tasks().len(), 3);
    assert!(started.elapsed() < Duration::from_millis(800));
}

#[rstest]
#[case(ProviderError::unavailable(ProviderKind::Mailbox, "HTTP 503"), ProviderFailureKind::Unavailable)]
#[case(ProviderError::AuthInvalid { provider: ProviderKind::Mailbox }, ProviderFailureKind::AuthInvalid)]
#[case(ProviderError::malformed(ProviderKind::Mailbox, "bad json"), ProviderFailureKind::Malformed)]
#[tokio::test(flavor = "multi_thread")]
async fn failing_provider_contributes_nothing_and_is_reported(
    #[case] error: ProviderError,
    #[case] kind: ProviderFailureKind,
) {
    let seeded = seeded(&["local"], &ALL_LINKED).await;
    let engine = AggregationEngine::new(
        seeded.tasks,
        seeded.credentials,
        registry(vec![
            StubAdapter::items(ProviderKind::Tracker, &["issue"], Duration::ZERO),
            StubAdapter::failing(ProviderKind::Mailbox, error),
            StubAdapter::items(ProviderKind::Chat, &["ping"], Duration::ZERO),
        ]),
    );

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert_eq!(titles(view.tasks()), ["local", "issue", "ping"]);
    assert_eq!(
        view.status(ProviderKind::Mailbox),
        Some(ProviderOutcome::Failed { kind })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_tokens_require_reconnect() {
    let seeded = seeded(&[], &ALL_LINKED).await;
    let engine = AggregationEngine::new(
        seeded.tasks,
        seeded.credentials,
        registry(vec![
            StubAdapter::failing(
                ProviderKind::Tracker,
                ProviderError::AuthInvalid {
                    provider: ProviderKind::Tracker,
                },
            ),
            StubAdapter::failing(
                ProviderKind::Mailbox,
                ProviderError::unavailable(ProviderKind::Mailbox, "HTTP 502"),
            ),
            StubAdapter::failing(
                ProviderKind::Chat,
                ProviderError::AuthInvalid {
                    provider: ProviderKind::Chat,
                },
            ),
        ]),
    );

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert!(view.tasks().is_empty());
    assert_eq!(
        view.reconnect_required(),
        [ProviderKind::Tracker, ProviderKind::Chat]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_provider_times_out_as_unavailable() {
    let seeded = seeded(&["local"], &[ProviderKind::Chat]).await;
    let engine = AggregationEngine::new(
        seeded.tasks,
        seeded.credentials,
        registry(vec![StubAdapter::items(
            ProviderKind::Chat,
            &["late"],
            Duration::from_secs(5),
        )]),
    )
    .with_adapter_timeout(Duration::from_millis(50));

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert_eq!(titles(view.tasks()), ["local"]);
    assert_eq!(
        view.status(ProviderKind::Chat),
        Some(ProviderOutcome::Failed {
            kind: ProviderFailureKind::Unavailable
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn linked_provider_without_adapter_is_unavailable() {
    let seeded = seeded(&[], &[ProviderKind::Tracker]).await;
    let engine = AggregationEngine::new(seeded.tasks, seeded.credentials, ProviderRegistry::new());

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    assert_eq!(
        view.status(ProviderKind::Tracker),
        Some(ProviderOutcome::Failed {
            kind: ProviderFailureKind::Unavailable
        })
    );
    assert_eq!(view.status(ProviderKind::Mailbox), Some(ProviderOutcome::NotLinked));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credential_store_failure_is_fatal() {
    let mut credentials = MockCredentials::new();
    credentials.expect_links().returning(|_| {
        Err(CredentialStoreError::persistence(std::io::Error::other(
            "connection refused",
        )))
    });
    let engine = AggregationEngine::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(credentials),
        ProviderRegistry::new(),
    );

    let result = engine.aggregate(UserId::new()).await;

    assert!(matches!(result, Err(AggregationError::StorageUnavailable(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn providers_are_reported_in_fixed_order() {
    let seeded = seeded(&[], &[ProviderKind::Chat]).await;
    let engine = AggregationEngine::new(
        seeded.tasks,
        Arc::<InMemoryCredentialStore>::clone(&seeded.credentials),
        registry(vec![StubAdapter::items(ProviderKind::Chat, &[], Duration::ZERO)]),
    );

    let view = engine.aggregate(seeded.user).await.expect("aggregate succeeds");

    let reported: Vec<ProviderKind> = view.providers().iter().map(|status| status.provider).collect();
    assert_eq!(reported, ProviderKind::ALL);
    assert_eq!(
        view.status(ProviderKind::Chat),
        Some(ProviderOutcome::Fetched { count: 0 })
    );
}
