//! Per-provider OAuth parameters.

use crate::provider::domain::ProviderKind;
use std::fmt;

/// OAuth client secret.
///
/// `Debug` output is redacted and there is no `Display` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wraps a client secret.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw secret for use in the token request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}

/// Client registration with one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// Public client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: ClientSecret,
    /// Callback URL registered with the provider.
    pub redirect_uri: String,
}

impl ClientCredentials {
    /// Creates client credentials.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: ClientSecret,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// Everything the exchange flow needs to know about one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    provider: ProviderKind,
    authorize_url: String,
    token_url: String,
    scopes: Vec<String>,
    scope_separator: &'static str,
    extra_params: Vec<(String, String)>,
    credentials: ClientCredentials,
}

impl ProviderDescriptor {
    /// GitHub: repository access plus the user's identity and email.
    #[must_use]
    pub fn github(credentials: ClientCredentials) -> Self {
        Self {
            provider: ProviderKind::Tracker,
            authorize_url: "https://github.com/login/oauth/authorize".to_owned(),
            token_url: "https://github.com/login/oauth/access_token".to_owned(),
            scopes: vec!["repo".to_owned(), "read:user".to_owned(), "user:email".to_owned()],
            scope_separator: " ",
            extra_params: Vec::new(),
            credentials,
        }
    }

    /// Gmail: read-only mailbox access with offline consent.
    #[must_use]
    pub fn gmail(credentials: ClientCredentials) -> Self {
        Self {
            provider: ProviderKind::Mailbox,
            authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_owned(),
            token_url: "https://oauth2.googleapis.com/token".to_owned(),
            scopes: vec!["https://www.googleapis.com/auth/gmail.readonly".to_owned()],
            scope_separator: " ",
            extra_params: vec![("access_type".to_owned(), "offline".to_owned())],
            credentials,
        }
    }

    /// Slack: channel history, message posting and user lookup.
    #[must_use]
    pub fn slack(credentials: ClientCredentials) -> Self {
        Self {
            provider: ProviderKind::Chat,
            authorize_url: "https://slack.com/oauth/v2/authorize".to_owned(),
            token_url: "https://slack.com/api/oauth.v2.access".to_owned(),
            scopes: vec![
                "channels:history".to_owned(),
                "chat:write".to_owned(),
                "users:read".to_owned(),
            ],
            scope_separator: ",",
            extra_params: Vec::new(),
            credentials,
        }
    }

    /// Overrides the authorization and token endpoints.
    #[must_use]
    pub fn with_endpoints(
        mut self,
        authorize_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.authorize_url = authorize_url.into();
        self.token_url = token_url.into();
        self
    }

    /// Returns the provider this descriptor configures.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Returns the authorization endpoint.
    #[must_use]
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    /// Returns the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the requested scopes joined with the provider's separator.
    #[must_use]
    pub fn scope(&self) -> String {
        self.scopes.join(self.scope_separator)
    }

    /// Returns additional authorization query parameters.
    #[must_use]
    pub fn extra_params(&self) -> &[(String, String)] {
        &self.extra_params
    }

    /// Returns the client registration.
    #[must_use]
    pub const fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }
}
