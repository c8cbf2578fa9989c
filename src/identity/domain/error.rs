//! Error types for identity validation and session checks.

use thiserror::Error;

/// Errors returned while constructing account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is not in `local@domain` form.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The credential hash is empty.
    #[error("credential hash must not be empty")]
    EmptyCredentialHash,
}

/// Errors returned by the session guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No bearer credential was presented.
    #[error("missing bearer credential")]
    Unauthenticated,

    /// The credential is malformed, forged, or expired.
    #[error("invalid or expired bearer credential")]
    InvalidCredential,

    /// A session token could not be minted.
    #[error("failed to issue session token: {0}")]
    Issuance(String),
}
