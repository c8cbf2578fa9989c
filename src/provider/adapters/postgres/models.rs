//! Diesel row model for provider links.

use super::schema::provider_links;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::fmt;

/// Row for the `provider_links` table.
#[derive(Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = provider_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProviderLinkRow {
    /// Owning account.
    pub user_id: uuid::Uuid,
    /// Canonical provider name.
    pub provider: String,
    /// Provider access token.
    pub access_token: String,
    /// Provider account hint.
    pub account_hint: Option<String>,
    /// Link timestamp.
    pub linked_at: DateTime<Utc>,
}

impl fmt::Debug for ProviderLinkRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderLinkRow")
            .field("user_id", &self.user_id)
            .field("provider", &self.provider)
            .field("access_token", &"<redacted>")
            .field("account_hint", &self.account_hint)
            .field("linked_at", &self.linked_at)
            .finish()
    }
}
