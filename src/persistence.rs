//! Shared `PostgreSQL` plumbing for the diesel-backed adapters.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by every diesel adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema for users, provider links and tasks.
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_taskmesh_tables/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum PersistenceSetupError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("failed to open PostgreSQL pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Applying the schema failed.
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PersistenceSetupError::Pool`] when no connection can be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PersistenceSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies [`SCHEMA_SQL`] using a pooled connection.
///
/// This is blocking and is meant to run once during bootstrap.
///
/// # Errors
///
/// Returns [`PersistenceSetupError`] on connection or SQL failure.
pub fn apply_schema(pool: &PgPool) -> Result<(), PersistenceSetupError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

/// Port error types that can wrap an arbitrary persistence failure.
pub(crate) trait PersistenceFailure: Sized {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs a diesel closure on the blocking pool with a checked-out connection.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(E::from_failure)?;
        f(&mut connection)
    })
    .await
    .map_err(E::from_failure)?
}
