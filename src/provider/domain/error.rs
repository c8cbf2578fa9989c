//! Provider failure taxonomy.

use super::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for provider adapter calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure raised by a provider adapter.
///
/// Reasons carry status codes and decoder messages only; they never contain
/// tokens or raw provider bodies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Network failure, timeout or non-authorization HTTP error.
    #[error("{provider} is unavailable: {reason}")]
    Unavailable {
        /// Failing provider.
        provider: ProviderKind,
        /// Short description of the failure.
        reason: String,
    },

    /// The provider rejected the access token.
    #[error("{provider} rejected the stored access token")]
    AuthInvalid {
        /// Failing provider.
        provider: ProviderKind,
    },

    /// The provider answered with an unexpected shape.
    #[error("{provider} returned a malformed response: {reason}")]
    Malformed {
        /// Failing provider.
        provider: ProviderKind,
        /// Short description of the decoding failure.
        reason: String,
    },
}

impl ProviderError {
    /// Creates an [`ProviderError::Unavailable`] error.
    pub fn unavailable(provider: ProviderKind, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            provider,
            reason: reason.into(),
        }
    }

    /// Creates a [`ProviderError::Malformed`] error.
    pub fn malformed(provider: ProviderKind, reason: impl Into<String>) -> Self {
        Self::Malformed {
            provider,
            reason: reason.into(),
        }
    }

    /// Returns the failing provider.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        match self {
            Self::Unavailable { provider, .. }
            | Self::AuthInvalid { provider }
            | Self::Malformed { provider, .. } => *provider,
        }
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ProviderFailureKind {
        match self {
            Self::Unavailable { .. } => ProviderFailureKind::Unavailable,
            Self::AuthInvalid { .. } => ProviderFailureKind::AuthInvalid,
            Self::Malformed { .. } => ProviderFailureKind::Malformed,
        }
    }
}

/// Classification of a provider failure, reported alongside aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFailureKind {
    /// Transient failure; retrying later may succeed.
    Unavailable,
    /// Token rejected; the user must re-run the authorize step.
    AuthInvalid,
    /// Unexpected response shape.
    Malformed,
}

impl ProviderFailureKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::AuthInvalid => "auth_invalid",
            Self::Malformed => "malformed",
        }
    }
}

impl fmt::Display for ProviderFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing provider names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown provider: {0}")]
pub struct ParseProviderKindError(pub String);
