//! Values exchanged with the browser during authorization.

use crate::identity::domain::UserId;
use crate::provider::domain::ProviderLink;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider authorization URL the browser should visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRedirect {
    /// Fully-formed authorization URL including the signed state.
    pub url: String,
    /// When the embedded state stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Query parameters the provider appends to the callback URL.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    /// Authorization code.
    #[serde(default)]
    pub code: Option<String>,
    /// Signed state issued by the authorize step.
    #[serde(default)]
    pub state: Option<String>,
    /// Provider error code when the user declined or the request failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl fmt::Debug for CallbackParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackParams")
            .field("code", &self.code.as_ref().map(|_| "<redacted>"))
            .field("state", &self.state.as_ref().map(|_| "<redacted>"))
            .field("error", &self.error)
            .finish()
    }
}

/// Result of a successful callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedProvider {
    /// Account recovered from the state parameter.
    pub user: UserId,
    /// Link written to the credential store.
    pub link: ProviderLink,
}
