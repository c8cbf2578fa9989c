//! Account aggregate.

use super::{IdentityDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] when the value lacks a
    /// non-empty local part and domain separated by a single `@`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    display_name: String,
    credential_hash: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted opaque credential hash.
    pub credential_hash: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the display name or credential hash
    /// is empty.
    pub fn new(
        email: EmailAddress,
        display_name: impl Into<String>,
        credential_hash: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let display_name = display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(IdentityDomainError::EmptyDisplayName);
        }
        let credential_hash = credential_hash.into();
        if credential_hash.is_empty() {
            return Err(IdentityDomainError::EmptyCredentialHash);
        }

        Ok(Self {
            id: UserId::new(),
            email,
            display_name,
            credential_hash,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            display_name: data.display_name,
            credential_hash: data.credential_hash,
            created_at: data.created_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the opaque credential hash.
    #[must_use]
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("credential_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
