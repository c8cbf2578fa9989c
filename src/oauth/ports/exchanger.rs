//! Token exchange port.

use crate::oauth::domain::{ExchangeError, ProviderDescriptor};
use crate::provider::domain::AccessToken;
use async_trait::async_trait;

/// Token obtained from a provider's token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangedToken {
    /// Access token; never empty.
    pub access_token: AccessToken,
    /// Provider account identifier, when the response includes one.
    pub account_hint: Option<String>,
}

/// Exchanges an authorization code for an access token.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Performs one token request for `code` against `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError`] when the provider refuses the code, cannot be
    /// reached, or answers without a usable token.
    async fn exchange(
        &self,
        descriptor: &ProviderDescriptor,
        code: &str,
    ) -> Result<ExchangedToken, ExchangeError>;
}
