//! Signed `state` claims carried through the provider redirect.

use crate::identity::domain::UserId;
use crate::provider::domain::ProviderKind;
use crate::signing::ExpiringClaims;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long an authorization attempt may take, in seconds.
pub const STATE_LIFETIME_SECS: i64 = 10 * 60;

/// Claims identifying who started an authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateClaims {
    /// Account that started the flow.
    pub sub: UserId,
    /// Provider being linked.
    pub provider: ProviderKind,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
    /// Random value making every state unique.
    pub nonce: String,
}

impl StateClaims {
    /// Creates claims for an attempt started at `now`.
    #[must_use]
    pub fn issued_at(user: UserId, provider: ProviderKind, now: DateTime<Utc>) -> Self {
        Self {
            sub: user,
            provider,
            exp: now.timestamp() + STATE_LIFETIME_SECS,
            nonce: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

impl ExpiringClaims for StateClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
