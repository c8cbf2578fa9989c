//! Parametrized authorize/callback flow shared by every provider.

use crate::identity::domain::UserId;
use crate::oauth::{
    domain::{
        AuthorizationRedirect, CallbackParams, LinkedProvider, OAuthError, OAuthResult,
        ProviderDescriptor, StateClaims, StateRejection,
    },
    ports::TokenExchanger,
};
use crate::provider::{
    domain::{ProviderKind, ProviderLink},
    ports::CredentialStore,
};
use crate::signing::{SigningError, TokenSigner};
use chrono::DateTime;
use mockable::Clock;
use reqwest::Url;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Purpose label binding OAuth state tokens to their own signing key.
pub const OAUTH_STATE_PURPOSE: &str = "taskmesh-oauth-state";

/// Links providers to accounts through the authorization-code grant.
///
/// The callback never writes unless the state verifies, the provider
/// returned a code, and the exchange produced a non-empty token. The write
/// itself is a single upsert per `(user, provider)`.
pub struct OAuthExchangeFlow<S, X, C>
where
    S: CredentialStore + ?Sized,
    X: TokenExchanger + ?Sized,
    C: Clock + Send + Sync,
{
    descriptors: Arc<BTreeMap<ProviderKind, ProviderDescriptor>>,
    signer: TokenSigner,
    store: Arc<S>,
    exchanger: Arc<X>,
    clock: Arc<C>,
}

impl<S, X, C> OAuthExchangeFlow<S, X, C>
where
    S: CredentialStore + ?Sized,
    X: TokenExchanger + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a flow for the given provider descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::EmptySecret`] when `state_secret` is empty.
    pub fn new(
        descriptors: impl IntoIterator<Item = ProviderDescriptor>,
        state_secret: impl AsRef<[u8]>,
        store: Arc<S>,
        exchanger: Arc<X>,
        clock: Arc<C>,
    ) -> Result<Self, SigningError> {
        let by_provider = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.provider(), descriptor))
            .collect();
        Ok(Self {
            descriptors: Arc::new(by_provider),
            signer: TokenSigner::new(state_secret, OAUTH_STATE_PURPOSE)?,
            store,
            exchanger,
            clock,
        })
    }

    /// Returns the descriptor for `provider`, if configured.
    #[must_use]
    pub fn descriptor(&self, provider: ProviderKind) -> Option<&ProviderDescriptor> {
        self.descriptors.get(&provider)
    }

    /// Builds the provider authorization URL for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::NotConfigured`] for an unconfigured provider or
    /// [`OAuthError::StateIssuance`] when the URL or state cannot be built.
    pub fn authorize(
        &self,
        user: UserId,
        provider: ProviderKind,
    ) -> OAuthResult<AuthorizationRedirect> {
        let descriptor = self
            .descriptor(provider)
            .ok_or(OAuthError::NotConfigured(provider))?;
        let claims = StateClaims::issued_at(user, provider, self.clock.utc());
        let state = self
            .signer
            .sign(&claims)
            .map_err(|err| OAuthError::StateIssuance(err.to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| OAuthError::StateIssuance("expiry out of range".to_owned()))?;

        let credentials = descriptor.credentials();
        let scope = descriptor.scope();
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", credentials.client_id.as_str()),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];
        params.extend(
            descriptor
                .extra_params()
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        let url = Url::parse_with_params(descriptor.authorize_url(), &params)
            .map_err(|err| OAuthError::StateIssuance(err.to_string()))?;

        info!(user_id = %user, provider = %provider, "issued authorization redirect");
        Ok(AuthorizationRedirect {
            url: url.into(),
            expires_at,
        })
    }

    /// Completes authorization for `provider` and stores the resulting link.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::IdentityRecoveryFailed`] when the state is
    /// missing, tampered with, expired or issued for another provider; in
    /// that case the exchange is never attempted. Other failures are
    /// [`OAuthError::Denied`], [`OAuthError::MissingCode`],
    /// [`OAuthError::Exchange`] and [`OAuthError::Store`]. Nothing is
    /// written on any failure.
    pub async fn callback(
        &self,
        provider: ProviderKind,
        params: CallbackParams,
    ) -> OAuthResult<LinkedProvider> {
        let descriptor = self
            .descriptor(provider)
            .ok_or(OAuthError::NotConfigured(provider))?;
        let user = self
            .recover_identity(provider, params.state.as_deref())
            .inspect_err(|err| {
                warn!(provider = %provider, reason = %err, "rejected authorization callback");
            })?;

        if let Some(error) = params.error {
            warn!(user_id = %user, provider = %provider, error = %error, "provider denied authorization");
            return Err(OAuthError::Denied(error));
        }
        let code = params
            .code
            .filter(|value| !value.trim().is_empty())
            .ok_or(OAuthError::MissingCode)?;

        let exchanged = self
            .exchanger
            .exchange(descriptor, &code)
            .await
            .inspect_err(|err| {
                warn!(user_id = %user, provider = %provider, error = %err, "token exchange failed");
            })?;

        let mut link = ProviderLink::new(provider, exchanged.access_token, &*self.clock);
        if let Some(hint) = exchanged.account_hint {
            link = link.with_account_hint(hint);
        }
        self.store.set(user, &link).await?;
        info!(user_id = %user, provider = %provider, "linked provider");
        Ok(LinkedProvider { user, link })
    }

    /// Removes the stored link for `provider`.
    ///
    /// Returns `true` when a link existed.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Store`] when the credential store fails.
    pub async fn unlink(&self, user: UserId, provider: ProviderKind) -> OAuthResult<bool> {
        let removed = self.store.remove(user, provider).await?;
        info!(user_id = %user, provider = %provider, removed, "unlinked provider");
        Ok(removed)
    }

    fn recover_identity(
        &self,
        provider: ProviderKind,
        state: Option<&str>,
    ) -> OAuthResult<UserId> {
        let raw = state
            .filter(|value| !value.trim().is_empty())
            .ok_or(OAuthError::IdentityRecoveryFailed(StateRejection::Missing))?;
        let claims: StateClaims = self
            .signer
            .verify(raw, self.clock.utc())
            .map_err(|err| {
                OAuthError::IdentityRecoveryFailed(match err {
                    SigningError::BadSignature => StateRejection::BadSignature,
                    SigningError::Expired => StateRejection::Expired,
                    _ => StateRejection::Malformed,
                })
            })?;
        if claims.provider != provider {
            return Err(OAuthError::IdentityRecoveryFailed(
                StateRejection::ProviderMismatch,
            ));
        }
        Ok(claims.sub)
    }
}
