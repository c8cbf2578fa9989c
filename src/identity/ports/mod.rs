//! Port contracts for account storage.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
