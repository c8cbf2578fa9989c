//! Port contracts for local task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! the aggregation engine.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
