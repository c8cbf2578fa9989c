//! Token exchange over HTTP.

use crate::oauth::{
    domain::{ExchangeError, ProviderDescriptor},
    ports::{ExchangedToken, TokenExchanger},
};
use crate::provider::{adapters::http::describe_transport, domain::AccessToken};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Form-encoded `authorization_code` grant against a provider token endpoint.
///
/// Handles both the standard response (`access_token` at the top level, with
/// errors in an `error` field) and Slack's (`ok` flag, user token under
/// `authed_user`).
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    authed_user: Option<AuthedUser>,
}

#[derive(Debug, Deserialize)]
struct AuthedUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
}

impl HttpTokenExchanger {
    /// Creates an exchanger using `client`.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TokenResponse {
    fn into_token(self) -> Result<ExchangedToken, ExchangeError> {
        if let Some(code) = self.error {
            return Err(ExchangeError::Rejected(code));
        }
        if self.ok == Some(false) {
            return Err(ExchangeError::Rejected("unspecified".to_owned()));
        }

        let (user_token, account_hint) = self
            .authed_user
            .map_or((None, None), |user| (user.access_token, user.id));
        let access_token = self
            .access_token
            .and_then(AccessToken::new)
            .or_else(|| user_token.and_then(AccessToken::new))
            .ok_or_else(|| ExchangeError::Malformed("response carries no access token".to_owned()))?;
        Ok(ExchangedToken {
            access_token,
            account_hint,
        })
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange(
        &self,
        descriptor: &ProviderDescriptor,
        code: &str,
    ) -> Result<ExchangedToken, ExchangeError> {
        let credentials = descriptor.credentials();
        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose()),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .client
            .post(descriptor.token_url())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|err| ExchangeError::Unavailable(describe_transport(&err)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ExchangeError::Unavailable(describe_transport(&err)))?;
        if status.is_server_error() {
            return Err(ExchangeError::Unavailable(format!("HTTP {status}")));
        }

        let parsed: TokenResponse = serde_json::from_slice(&body).map_err(|_| {
            ExchangeError::Malformed(format!("HTTP {status} with a non-JSON body"))
        })?;
        if !status.is_success() && parsed.error.is_none() {
            return Err(ExchangeError::Rejected(format!("http_{}", status.as_u16())));
        }
        parsed.into_token()
    }
}
