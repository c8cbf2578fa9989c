//! Error types for provider authorization.

use crate::provider::{domain::ProviderKind, ports::CredentialStoreError};
use thiserror::Error;

/// Result type for OAuth flow operations.
pub type OAuthResult<T> = Result<T, OAuthError>;

/// Why a callback `state` could not be trusted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StateRejection {
    /// No state was supplied.
    #[error("state parameter is missing")]
    Missing,
    /// The state is not a well-formed signed token.
    #[error("state parameter is malformed")]
    Malformed,
    /// The signature does not match.
    #[error("state signature mismatch")]
    BadSignature,
    /// The authorization attempt took too long.
    #[error("state has expired")]
    Expired,
    /// The state was issued for another provider.
    #[error("state was issued for another provider")]
    ProviderMismatch,
}

/// Failure exchanging an authorization code for a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExchangeError {
    /// The provider refused the code; carries the provider's error code.
    #[error("provider rejected the authorization code: {0}")]
    Rejected(String),
    /// The token endpoint could not be reached.
    #[error("token endpoint unavailable: {0}")]
    Unavailable(String),
    /// The token endpoint answered without a usable token.
    #[error("token response malformed: {0}")]
    Malformed(String),
}

/// Errors returned by the OAuth exchange flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// No descriptor is configured for the provider.
    #[error("{0} is not configured")]
    NotConfigured(ProviderKind),

    /// The calling user could not be recovered from `state`.
    #[error("identity recovery failed: {0}")]
    IdentityRecoveryFailed(StateRejection),

    /// The provider reported an authorization error.
    #[error("authorization denied: {0}")]
    Denied(String),

    /// The callback carried no authorization code.
    #[error("authorization code is missing")]
    MissingCode,

    /// Exchanging the code failed.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// Signing the state failed.
    #[error("failed to issue state: {0}")]
    StateIssuance(String),

    /// Reading or writing the credential store failed.
    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}

impl OAuthError {
    /// Returns a stable, secret-free code describing the failure.
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "provider_not_configured",
            Self::IdentityRecoveryFailed(_) => "identity_recovery_failed",
            Self::Denied(_) => "access_denied",
            Self::MissingCode => "missing_code",
            Self::Exchange(ExchangeError::Rejected(_)) => "exchange_rejected",
            Self::Exchange(ExchangeError::Unavailable(_)) => "exchange_unavailable",
            Self::Exchange(ExchangeError::Malformed(_)) => "exchange_malformed",
            Self::StateIssuance(_) => "state_issuance_failed",
            Self::Store(_) => "storage_unavailable",
        }
    }
}
