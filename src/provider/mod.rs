//! External work-item providers and their per-user credentials.
//!
//! Each provider (issue tracker, mailbox, team chat) is reached through one
//! [`ports::ProviderAdapter`] implementation that maps provider-native items
//! into [`crate::task::domain::TaskView`] values. Access tokens obtained by
//! the OAuth flow are kept in a [`ports::CredentialStore`]; a stored link is
//! the only signal that a provider is connected for a user.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Adapter lookup in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
