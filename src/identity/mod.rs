//! Account identity and session authentication.
//!
//! Every protected operation in the crate is reached only after the
//! [`services::SessionGuard`] resolves a bearer credential into a
//! [`domain::UserId`]. Accounts themselves are stored through the
//! [`ports::UserRepository`] port; password hashing stays outside this crate
//! and only an opaque credential hash is persisted.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
