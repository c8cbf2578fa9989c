//! In-memory credential storage.

mod credentials;

pub use credentials::InMemoryCredentialStore;
