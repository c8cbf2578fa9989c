//! Provider adapter port.

use crate::provider::domain::{AccessToken, ProviderKind, ProviderResult};
use crate::task::domain::TaskView;
use async_trait::async_trait;

/// Fetches a provider's outstanding items as normalized task views.
///
/// Implementations either return every item they fetched or fail with a
/// [`crate::provider::domain::ProviderError`]; they never return a partial
/// list without signalling the failure.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Returns the provider this adapter serves.
    fn provider(&self) -> ProviderKind;

    /// Fetches items using `token`.
    ///
    /// `identity_hint` is the provider account name captured at link time,
    /// when the provider reported one.
    async fn fetch(
        &self,
        token: &AccessToken,
        identity_hint: Option<&str>,
    ) -> ProviderResult<Vec<TaskView>>;
}
