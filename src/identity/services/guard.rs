//! Bearer session issuance and verification.

use crate::identity::domain::{IssuedSession, SessionClaims, SessionError, UserId};
use crate::signing::{SigningError, TokenSigner};
use chrono::DateTime;
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Purpose label binding session tokens to their own signing key.
pub const SESSION_TOKEN_PURPOSE: &str = "taskmesh-session";

const BEARER_SCHEME: &str = "bearer";

/// Issues session tokens and resolves bearer credentials to accounts.
#[derive(Clone)]
pub struct SessionGuard<C>
where
    C: Clock + Send + Sync,
{
    signer: TokenSigner,
    clock: Arc<C>,
}

impl<C> SessionGuard<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a guard signing with a key derived from `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::EmptySecret`] when `secret` is empty.
    pub fn new(secret: impl AsRef<[u8]>, clock: Arc<C>) -> Result<Self, SigningError> {
        Ok(Self {
            signer: TokenSigner::new(secret, SESSION_TOKEN_PURPOSE)?,
            clock,
        })
    }

    /// Mints a seven-day session token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Issuance`] when the claims cannot be signed.
    pub fn issue(&self, user: UserId) -> Result<IssuedSession, SessionError> {
        let claims = SessionClaims::issued_at(user, self.clock.utc());
        let token = self
            .signer
            .sign(&claims)
            .map_err(|err| SessionError::Issuance(err.to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| SessionError::Issuance("expiry out of range".to_owned()))?;
        Ok(IssuedSession {
            user,
            token,
            expires_at,
        })
    }

    /// Resolves the value of an `Authorization` header to an account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] when no credential is
    /// present and [`SessionError::InvalidCredential`] when the scheme is not
    /// `Bearer` or the token is malformed, forged, or expired.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<UserId, SessionError> {
        let header = authorization
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SessionError::Unauthenticated)?;

        let (scheme, token) = header
            .split_once(' ')
            .ok_or(SessionError::InvalidCredential)?;
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(SessionError::InvalidCredential);
        }
        self.verify(token.trim())
    }

    /// Verifies a raw session token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredential`] for any token that does not
    /// verify or has expired.
    pub fn verify(&self, token: &str) -> Result<UserId, SessionError> {
        if token.is_empty() {
            return Err(SessionError::InvalidCredential);
        }
        let claims: SessionClaims = self
            .signer
            .verify(token, self.clock.utc())
            .map_err(|err| {
                debug!(reason = %err, "rejected session token");
                SessionError::InvalidCredential
            })?;
        Ok(claims.sub)
    }
}

impl<C> std::fmt::Debug for SessionGuard<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
