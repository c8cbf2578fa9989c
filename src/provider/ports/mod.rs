//! Port contracts for provider access and credential storage.

mod adapter;
mod credentials;

pub use adapter::ProviderAdapter;
pub use credentials::{CredentialStore, CredentialStoreError, CredentialStoreResult};
