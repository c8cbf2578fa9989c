//! `PostgreSQL` adapters for local task storage.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
