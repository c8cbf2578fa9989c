//! `PostgreSQL` credential storage.

mod models;
mod repository;
mod schema;

pub use repository::PostgresCredentialStore;
