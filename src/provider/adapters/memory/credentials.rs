//! In-memory credential store for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::provider::{
    domain::{ProviderKind, ProviderLink},
    ports::{CredentialStore, CredentialStoreError, CredentialStoreResult},
};

/// Thread-safe in-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    state: Arc<RwLock<HashMap<UserId, BTreeMap<ProviderKind, ProviderLink>>>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CredentialStoreError {
    CredentialStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(
        &self,
        user: UserId,
        provider: ProviderKind,
    ) -> CredentialStoreResult<Option<ProviderLink>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&user)
            .and_then(|links| links.get(&provider))
            .cloned())
    }

    async fn set(&self, user: UserId, link: &ProviderLink) -> CredentialStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .entry(user)
            .or_default()
            .insert(link.provider(), link.clone());
        Ok(())
    }

    async fn remove(&self, user: UserId, provider: ProviderKind) -> CredentialStoreResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state
            .get_mut(&user)
            .and_then(|links| links.remove(&provider))
            .is_some())
    }

    async fn links(&self, user: UserId) -> CredentialStoreResult<Vec<ProviderLink>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&user)
            .map(|links| links.values().cloned().collect())
            .unwrap_or_default())
    }
}
