//! Application services for accounts and sessions.

mod account;
mod guard;

pub use account::{AccountError, AccountService, RegisterUserRequest};
pub use guard::{SESSION_TOKEN_PURPOSE, SessionGuard};
