//! Session token claims.

use super::UserId;
use crate::signing::ExpiringClaims;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session lifetime: seven days.
pub const SESSION_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by a signed session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated account.
    pub sub: UserId,
    /// Issue time as a Unix timestamp.
    pub iat: i64,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for `user` issued at `now`.
    #[must_use]
    pub fn issued_at(user: UserId, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            sub: user,
            iat,
            exp: iat + SESSION_LIFETIME_SECS,
        }
    }
}

impl ExpiringClaims for SessionClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

/// A freshly minted session credential.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedSession {
    /// Account the session belongs to.
    pub user: UserId,
    /// Compact signed token to present as `Authorization: Bearer <token>`.
    pub token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
