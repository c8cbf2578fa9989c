//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmesh::aggregation::services::AggregationEngine;
use taskmesh::provider::{
    adapters::memory::InMemoryCredentialStore, services::ProviderRegistry,
};
use taskmesh::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};

/// Task service over in-memory storage.
pub type MemoryTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Engine over in-memory storage.
pub type MemoryEngine = AggregationEngine<InMemoryTaskRepository, InMemoryCredentialStore>;

/// Services sharing one in-memory task repository.
pub struct Services {
    pub tasks: MemoryTaskService,
    pub engine: Arc<MemoryEngine>,
}

/// Provides services with no provider adapters registered.
#[fixture]
pub fn services() -> Services {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let engine = Arc::new(AggregationEngine::new(
        Arc::clone(&repository),
        credentials,
        ProviderRegistry::new(),
    ));
    Services {
        tasks: TaskService::new(repository, Arc::new(DefaultClock)),
        engine,
    }
}
