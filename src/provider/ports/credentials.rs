//! Credential store port.

use crate::identity::domain::UserId;
use crate::provider::domain::{ProviderKind, ProviderLink};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for credential store operations.
pub type CredentialStoreResult<T> = Result<T, CredentialStoreError>;

/// Per-user provider link storage.
///
/// Writes are atomic per `(user, provider)` pair: a link is either fully
/// replaced or left untouched.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the link for `provider`, or `None` when it is not linked.
    async fn get(
        &self,
        user: UserId,
        provider: ProviderKind,
    ) -> CredentialStoreResult<Option<ProviderLink>>;

    /// Creates or replaces the link for `link.provider()`.
    async fn set(&self, user: UserId, link: &ProviderLink) -> CredentialStoreResult<()>;

    /// Removes the link for `provider`.
    ///
    /// Returns `true` when a link existed.
    async fn remove(&self, user: UserId, provider: ProviderKind) -> CredentialStoreResult<bool>;

    /// Returns every link for `user`, ordered by provider.
    async fn links(&self, user: UserId) -> CredentialStoreResult<Vec<ProviderLink>>;
}

/// Errors returned by credential store implementations.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CredentialStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
