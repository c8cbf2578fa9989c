//! Stored association between a user and a provider token.

use super::{AccessToken, ProviderKind};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A linked provider for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLink {
    provider: ProviderKind,
    access_token: AccessToken,
    account_hint: Option<String>,
    linked_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted provider link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProviderLinkData {
    /// Linked provider.
    pub provider: ProviderKind,
    /// Stored access token.
    pub access_token: AccessToken,
    /// Stored provider account hint.
    pub account_hint: Option<String>,
    /// Link timestamp.
    pub linked_at: DateTime<Utc>,
}

impl ProviderLink {
    /// Creates a link stamped with the current time.
    #[must_use]
    pub fn new(provider: ProviderKind, access_token: AccessToken, clock: &impl Clock) -> Self {
        Self {
            provider,
            access_token,
            account_hint: None,
            linked_at: clock.utc(),
        }
    }

    /// Sets the provider account hint (for example the tracker login).
    #[must_use]
    pub fn with_account_hint(mut self, hint: impl Into<String>) -> Self {
        let value = hint.into();
        self.account_hint = (!value.trim().is_empty()).then_some(value);
        self
    }

    /// Reconstructs a link from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProviderLinkData) -> Self {
        Self {
            provider: data.provider,
            access_token: data.access_token,
            account_hint: data.account_hint,
            linked_at: data.linked_at,
        }
    }

    /// Returns the linked provider.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Returns the stored access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the provider account hint, if known.
    #[must_use]
    pub fn account_hint(&self) -> Option<&str> {
        self.account_hint.as_deref()
    }

    /// Returns when the link was created or last replaced.
    #[must_use]
    pub const fn linked_at(&self) -> DateTime<Utc> {
        self.linked_at
    }
}
