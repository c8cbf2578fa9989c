//! `PostgreSQL` credential store implementation.

use super::{models::ProviderLinkRow, schema::provider_links};
use crate::identity::domain::UserId;
use crate::persistence::{PersistenceFailure, PgPool, run_blocking};
use crate::provider::{
    domain::{AccessToken, PersistedProviderLinkData, ProviderKind, ProviderLink},
    ports::{CredentialStore, CredentialStoreError, CredentialStoreResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;

impl PersistenceFailure for CredentialStoreError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed credential store.
///
/// Writes use `INSERT ... ON CONFLICT (user_id, provider) DO UPDATE`, so a
/// link is replaced in one statement.
#[derive(Debug, Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn get(
        &self,
        user: UserId,
        provider: ProviderKind,
    ) -> CredentialStoreResult<Option<ProviderLink>> {
        run_blocking(&self.pool, move |connection| {
            let row = provider_links::table
                .filter(provider_links::user_id.eq(user.into_inner()))
                .filter(provider_links::provider.eq(provider.as_str()))
                .select(ProviderLinkRow::as_select())
                .first::<ProviderLinkRow>(connection)
                .optional()
                .map_err(CredentialStoreError::persistence)?;
            row.map(row_to_link).transpose()
        })
        .await
    }

    async fn set(&self, user: UserId, link: &ProviderLink) -> CredentialStoreResult<()> {
        let row = to_row(user, link);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(provider_links::table)
                .values(&row)
                .on_conflict((provider_links::user_id, provider_links::provider))
                .do_update()
                .set((
                    provider_links::access_token.eq(excluded(provider_links::access_token)),
                    provider_links::account_hint.eq(excluded(provider_links::account_hint)),
                    provider_links::linked_at.eq(excluded(provider_links::linked_at)),
                ))
                .execute(connection)
                .map_err(CredentialStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, user: UserId, provider: ProviderKind) -> CredentialStoreResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(
                provider_links::table
                    .filter(provider_links::user_id.eq(user.into_inner()))
                    .filter(provider_links::provider.eq(provider.as_str())),
            )
            .execute(connection)
            .map_err(CredentialStoreError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn links(&self, user: UserId) -> CredentialStoreResult<Vec<ProviderLink>> {
        run_blocking(&self.pool, move |connection| {
            let rows = provider_links::table
                .filter(provider_links::user_id.eq(user.into_inner()))
                .select(ProviderLinkRow::as_select())
                .load::<ProviderLinkRow>(connection)
                .map_err(CredentialStoreError::persistence)?;
            let mut links = rows
                .into_iter()
                .map(row_to_link)
                .collect::<CredentialStoreResult<Vec<_>>>()?;
            links.sort_by_key(ProviderLink::provider);
            Ok(links)
        })
        .await
    }
}

fn to_row(user: UserId, link: &ProviderLink) -> ProviderLinkRow {
    ProviderLinkRow {
        user_id: user.into_inner(),
        provider: link.provider().as_str().to_owned(),
        access_token: link.access_token().expose().to_owned(),
        account_hint: link.account_hint().map(str::to_owned),
        linked_at: link.linked_at(),
    }
}

fn row_to_link(row: ProviderLinkRow) -> CredentialStoreResult<ProviderLink> {
    let provider =
        ProviderKind::try_from(row.provider.as_str()).map_err(CredentialStoreError::persistence)?;
    let access_token = AccessToken::new(row.access_token).ok_or_else(|| {
        CredentialStoreError::persistence(std::io::Error::other("stored access token is empty"))
    })?;
    Ok(ProviderLink::from_persisted(PersistedProviderLinkData {
        provider,
        access_token,
        account_hint: row.account_hint,
        linked_at: row.linked_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn link() -> ProviderLink {
        ProviderLink::new(
            ProviderKind::Tracker,
            AccessToken::new("gho_secret").expect("non-empty token"),
            &DefaultClock,
        )
        .with_account_hint("octocat")
    }

    #[rstest]
    fn row_mapping_preserves_link() {
        let original = link();
        let restored = row_to_link(to_row(UserId::new(), &original)).expect("valid row");
        assert_eq!(restored, original);
    }

    #[rstest]
    fn row_debug_redacts_token() {
        let row = to_row(UserId::new(), &link());
        assert!(!format!("{row:?}").contains("gho_secret"));
    }

    #[rstest]
    #[case("myspace", "gho_secret")]
    #[case("github", "   ")]
    fn invalid_rows_are_persistence_errors(#[case] provider: &str, #[case] token: &str) {
        let mut row = to_row(UserId::new(), &link());
        row.provider = provider.to_owned();
        row.access_token = token.to_owned();
        assert!(matches!(
            row_to_link(row),
            Err(CredentialStoreError::Persistence(_))
        ));
    }
}
