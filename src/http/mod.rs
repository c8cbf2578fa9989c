//! Axum surface over the identity, OAuth, aggregation and task services.
//!
//! Every route except `/health`, signup and the OAuth callback requires a
//! bearer session. The callback recovers its caller from the signed OAuth `state`
//! instead, because the provider redirects the browser without the session
//! header.
//!
//! - Shared handler state in [`AppState`]
//! - Bearer extraction in [`AuthenticatedUser`]
//! - Error-to-response mapping in [`ApiError`]
//! - Route table in [`router`]

mod error;
mod extract;
mod routes;
mod state;

pub use error::ApiError;
pub use extract::AuthenticatedUser;
pub use routes::router;
pub use state::{AccountHandle, AppState, DigestHandle, EngineHandle, OAuthHandle, TaskHandle};

#[cfg(test)]
mod tests;
