//! Registry mapping provider kinds to adapter instances.

use crate::provider::{domain::ProviderKind, ports::ProviderAdapter};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Adapters available to the aggregation engine, keyed by provider.
///
/// Registering a second adapter for the same provider replaces the first.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: BTreeMap<ProviderKind, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an adapter under the provider it reports.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapters.insert(adapter.provider(), adapter);
        self
    }

    /// Returns the adapter for `provider`, if one is registered.
    #[must_use]
    pub fn get(&self, provider: ProviderKind) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    /// Returns the registered providers in merge order.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderKind> {
        self.adapters.keys().copied().collect()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}
