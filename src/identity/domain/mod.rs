//! Domain model for accounts and sessions.

mod error;
mod ids;
mod session;
mod user;

pub use error::{IdentityDomainError, SessionError};
pub use ids::UserId;
pub use session::{IssuedSession, SESSION_LIFETIME_SECS, SessionClaims};
pub use user::{EmailAddress, PersistedUserData, User};
