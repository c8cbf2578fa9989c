//! HS256 JSON Web Tokens shared by session and OAuth state tokens.
//!
//! Each [`TokenSigner`] is bound to a purpose label: its key is derived from
//! the configured secret and the label, so a token minted for one purpose
//! never verifies under another even when both signers share a secret.
//!
//! Expiry is checked against the caller's clock rather than the system time,
//! which keeps expiry behaviour testable with a frozen clock.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Errors raised while signing or verifying tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The configured secret is empty.
    #[error("signing secret must not be empty")]
    EmptySecret,

    /// The token is not a well-formed JWT or lacks an `exp` claim.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The header names an algorithm other than `HS256`.
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,

    /// The signature does not match the token content.
    #[error("token signature mismatch")]
    BadSignature,

    /// The `exp` claim is not after the verification instant.
    #[error("token expired")]
    Expired,

    /// Claims could not be serialized.
    #[error("failed to encode token claims: {0}")]
    Encoding(String),
}

/// Claims carrying a Unix `exp` timestamp.
pub trait ExpiringClaims {
    /// Expiry as seconds since the Unix epoch.
    fn expires_at(&self) -> i64;
}

/// Purpose-bound HS256 token signer.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Creates a signer whose key is derived from `secret` and `purpose`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::EmptySecret`] when `secret` is empty.
    pub fn new(secret: impl AsRef<[u8]>, purpose: &str) -> Result<Self, SigningError> {
        let secret_bytes = secret.as_ref();
        if secret_bytes.is_empty() {
            return Err(SigningError::EmptySecret);
        }

        let mut hasher = Sha256::new();
        hasher.update(purpose.as_bytes());
        hasher.update([0_u8]);
        hasher.update(secret_bytes);
        let key = hasher.finalize();

        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
            validation,
        })
    }

    /// Signs `claims` and returns the compact token.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Encoding`] when the claims cannot be encoded.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, SigningError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding)
            .map_err(|err| SigningError::Encoding(err.to_string()))
    }

    /// Verifies the token and returns its claims if unexpired at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Malformed`], [`SigningError::UnsupportedAlgorithm`]
    /// or [`SigningError::BadSignature`] when the token cannot be trusted, and
    /// [`SigningError::Expired`] once `now` has reached its `exp` claim.
    pub fn verify<T>(&self, token: &str, now: DateTime<Utc>) -> Result<T, SigningError>
    where
        T: DeserializeOwned + ExpiringClaims,
    {
        let data = decode::<T>(token.trim(), &self.decoding, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::InvalidSignature => SigningError::BadSignature,
                ErrorKind::InvalidAlgorithm => SigningError::UnsupportedAlgorithm,
                _ => SigningError::Malformed(err.to_string()),
            },
        )?;
        if now.timestamp() >= data.claims.expires_at() {
            return Err(SigningError::Expired);
        }
        Ok(data.claims)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}
