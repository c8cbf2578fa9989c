//! Local task lifecycle through the service and aggregate view.

use super::helpers::{Services, services};
use rstest::rstest;
use taskmesh::aggregation::domain::ProviderOutcome;
use taskmesh::identity::domain::UserId;
use taskmesh::provider::domain::ProviderKind;
use taskmesh::task::{
    domain::{Priority, TaskSource},
    services::{CreateTaskRequest, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn aggregate_reflects_local_mutations(services: Services) {
    let user = UserId::new();
    let first = services
        .tasks
        .create(user, CreateTaskRequest::new("Draft agenda"))
        .await
        .expect("create first task");
    let second = services
        .tasks
        .create(
            user,
            CreateTaskRequest::new("Call plumber").with_priority(Priority::High),
        )
        .await
        .expect("create second task");
    services
        .tasks
        .set_completed(user, first.id(), true)
        .await
        .expect("complete first task");

    let view = services.engine.aggregate(user).await.expect("aggregate");
    let summary: Vec<(&str, Option<bool>)> = view
        .tasks()
        .iter()
        .map(|task| (task.title(), task.completed()))
        .collect();
    assert_eq!(
        summary,
        [("Draft agenda", Some(true)), ("Call plumber", Some(false))]
    );
    assert!(view.tasks().iter().all(|task| task.source() == TaskSource::Local));
    for provider in ProviderKind::ALL {
        assert_eq!(view.status(provider), Some(ProviderOutcome::NotLinked));
    }

    services
        .tasks
        .delete(user, second.id())
        .await
        .expect("delete second task");
    let after = services.engine.aggregate(user).await.expect("aggregate");
    assert_eq!(after.tasks().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_see_only_their_own_tasks(services: Services) {
    let alice = UserId::new();
    let bob = UserId::new();
    let task = services
        .tasks
        .create(alice, CreateTaskRequest::new("Alice's task"))
        .await
        .expect("create task");

    let bob_view = services.engine.aggregate(bob).await.expect("aggregate");
    assert!(bob_view.tasks().is_empty());

    let result = services.tasks.delete(bob, task.id()).await;
    assert!(matches!(result, Err(TaskServiceError::Forbidden(id)) if id == task.id()));
    assert_eq!(
        services.tasks.list(alice).await.expect("list").len(),
        1,
        "forbidden delete leaves the task in place"
    );
}
