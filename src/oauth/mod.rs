//! Provider authorization via the OAuth 2.0 authorization-code grant.
//!
//! A single [`services::OAuthExchangeFlow`] serves every provider; the
//! per-provider differences (endpoints, scopes, extra parameters and client
//! credentials) live in a [`domain::ProviderDescriptor`]. The user starting
//! the flow is carried through the provider round trip in a signed `state`
//! value, which is verified before any code is exchanged. Only a successful
//! exchange writes to the credential store.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
