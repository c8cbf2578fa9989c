//! `PostgreSQL` adapter for account storage.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
