//! Process configuration from command-line flags and `TASKMESH_*` variables.
//!
//! [`Settings`] is the raw clap surface: every option can be given as a flag
//! or through its environment variable. [`Settings::resolve`] applies the
//! cross-field rules clap cannot express and yields an [`AppConfig`].

use crate::aggregation::adapters::{ANTHROPIC_API_BASE, ApiKey, DEFAULT_ANTHROPIC_MODEL};
use crate::aggregation::services::DEFAULT_ADAPTER_TIMEOUT;
use crate::oauth::domain::{ClientCredentials, ClientSecret, ProviderDescriptor};
use crate::provider::adapters::{
    github::GITHUB_API_BASE, gmail::GMAIL_API_BASE, http::DEFAULT_PROVIDER_TIMEOUT,
    slack::SLACK_API_BASE,
};
use crate::provider::domain::ProviderKind;
use clap::Parser;
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_CLIENT_URL: &str = "http://localhost:3000";
const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors raised while resolving parsed settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value is absent or blank.
    #[error("missing required configuration variable {0}")]
    Missing(String),
}

/// Secret configuration value with redacted `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Returns the raw value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for Secret {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self(raw.trim().to_owned()))
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Command-line and environment settings.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskmesh", version, about = "Unified task list over linked providers")]
pub struct Settings {
    /// Address the HTTP server binds to
    #[arg(long, env = "TASKMESH_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: SocketAddr,

    /// Public base URL of this server, used for default OAuth redirect URIs
    #[arg(long, env = "TASKMESH_PUBLIC_URL", default_value = DEFAULT_PUBLIC_URL)]
    pub public_url: String,

    /// Browser client base URL that OAuth callbacks redirect to
    #[arg(long, env = "TASKMESH_CLIENT_URL", default_value = DEFAULT_CLIENT_URL)]
    pub client_url: String,

    /// Postgres connection URL; tasks and links are kept in memory when unset
    #[arg(long, env = "TASKMESH_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<Secret>,

    /// Maximum pooled database connections
    #[arg(
        long,
        env = "TASKMESH_DATABASE_POOL_SIZE",
        default_value_t = DEFAULT_POOL_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub database_pool_size: u32,

    /// Secret used to sign session and OAuth state tokens
    #[arg(long, env = "TASKMESH_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<Secret>,

    /// GitHub OAuth client id
    #[arg(long, env = "TASKMESH_GITHUB_CLIENT_ID")]
    pub github_client_id: Option<String>,

    /// GitHub OAuth client secret
    #[arg(long, env = "TASKMESH_GITHUB_CLIENT_SECRET", hide_env_values = true)]
    pub github_client_secret: Option<Secret>,

    /// GitHub OAuth redirect URI
    #[arg(long, env = "TASKMESH_GITHUB_REDIRECT_URI")]
    pub github_redirect_uri: Option<String>,

    /// Google OAuth client id
    #[arg(long, env = "TASKMESH_GMAIL_CLIENT_ID")]
    pub gmail_client_id: Option<String>,

    /// Google OAuth client secret
    #[arg(long, env = "TASKMESH_GMAIL_CLIENT_SECRET", hide_env_values = true)]
    pub gmail_client_secret: Option<Secret>,

    /// Google OAuth redirect URI
    #[arg(long, env = "TASKMESH_GMAIL_REDIRECT_URI")]
    pub gmail_redirect_uri: Option<String>,

    /// Slack OAuth client id
    #[arg(long, env = "TASKMESH_SLACK_CLIENT_ID")]
    pub slack_client_id: Option<String>,

    /// Slack OAuth client secret
    #[arg(long, env = "TASKMESH_SLACK_CLIENT_SECRET", hide_env_values = true)]
    pub slack_client_secret: Option<Secret>,

    /// Slack OAuth redirect URI
    #[arg(long, env = "TASKMESH_SLACK_REDIRECT_URI")]
    pub slack_redirect_uri: Option<String>,

    /// Slack channel read by the chat adapter; required when Slack is configured
    #[arg(long, env = "TASKMESH_SLACK_CHANNEL")]
    pub slack_channel: Option<String>,

    /// Timeout in seconds for each outbound provider request
    #[arg(
        long,
        env = "TASKMESH_PROVIDER_TIMEOUT_SECS",
        default_value_t = DEFAULT_PROVIDER_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub provider_timeout_secs: u64,

    /// Timeout in seconds for one adapter fetch as a whole
    #[arg(
        long,
        env = "TASKMESH_AGGREGATE_TIMEOUT_SECS",
        default_value_t = DEFAULT_ADAPTER_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub aggregate_timeout_secs: u64,

    /// GitHub REST API base URL
    #[arg(long, env = "TASKMESH_GITHUB_API_BASE", default_value = GITHUB_API_BASE)]
    pub github_api_base: String,

    /// Gmail API base URL
    #[arg(long, env = "TASKMESH_GMAIL_API_BASE", default_value = GMAIL_API_BASE)]
    pub gmail_api_base: String,

    /// Slack Web API base URL
    #[arg(long, env = "TASKMESH_SLACK_API_BASE", default_value = SLACK_API_BASE)]
    pub slack_api_base: String,

    /// Anthropic API base URL
    #[arg(long, env = "TASKMESH_ANTHROPIC_API_BASE", default_value = ANTHROPIC_API_BASE)]
    pub anthropic_api_base: String,

    /// Anthropic API key; digests carry no summary when unset
    #[arg(long, env = "TASKMESH_ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<Secret>,

    /// Model used for digest summaries
    #[arg(long, env = "TASKMESH_ANTHROPIC_MODEL", default_value = DEFAULT_ANTHROPIC_MODEL)]
    pub anthropic_model: String,
}

/// Provider API base URLs; overridden in tests to point at mock servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBases {
    /// GitHub REST API.
    pub github: String,
    /// Google APIs.
    pub gmail: String,
    /// Slack Web API.
    pub slack: String,
    /// Anthropic API.
    pub anthropic: String,
}

/// Summarizer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Anthropic API key.
    pub api_key: ApiKey,
    /// Model name.
    pub model: String,
}

/// Fully resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// `PostgreSQL` URL; in-memory storage is used when absent.
    pub database_url: Option<Secret>,
    /// Maximum pooled database connections.
    pub database_pool_size: u32,
    /// Secret used to sign session and OAuth state tokens.
    pub session_secret: Secret,
    /// Browser client base URL without a trailing slash.
    pub client_url: String,
    /// Configured OAuth providers.
    pub providers: Vec<ProviderDescriptor>,
    /// Slack channel read by the chat adapter.
    pub slack_channel: Option<String>,
    /// Timeout for each outbound provider request.
    pub provider_timeout: Duration,
    /// Timeout for one adapter fetch as a whole.
    pub adapter_timeout: Duration,
    /// Provider API base URLs.
    pub api_bases: ApiBases,
    /// Summarizer settings; digests carry no summary when absent.
    pub summarizer: Option<SummarizerConfig>,
}

impl AppConfig {
    /// Returns `true` when OAuth is configured for `provider`.
    #[must_use]
    pub fn has_provider(&self, provider: ProviderKind) -> bool {
        self.providers
            .iter()
            .any(|descriptor| descriptor.provider() == provider)
    }
}

type ClientFields<'a> = (Option<&'a str>, Option<&'a Secret>, Option<&'a str>);

impl Settings {
    /// Applies cross-field rules and builds the runtime configuration.
    ///
    /// Blank values count as unset. A provider is configured when its client
    /// id is present; its redirect URI defaults to
    /// `{public_url}/auth/{provider}/callback`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the session secret is unset, a
    /// client id has no matching secret, or Slack is configured without a
    /// channel.
    pub fn resolve(self) -> Result<AppConfig, ConfigError> {
        let session_secret = present_secret(self.session_secret.as_ref())
            .ok_or_else(|| ConfigError::Missing("TASKMESH_SESSION_SECRET".to_owned()))?;

        let mut providers = Vec::new();
        for provider in ProviderKind::ALL {
            if let Some(credentials) = self.client_credentials(provider)? {
                providers.push(match provider {
                    ProviderKind::Tracker => ProviderDescriptor::github(credentials),
                    ProviderKind::Mailbox => ProviderDescriptor::gmail(credentials),
                    ProviderKind::Chat => ProviderDescriptor::slack(credentials),
                });
            }
        }

        let slack_channel = present(self.slack_channel.as_deref());
        if slack_channel.is_none()
            && providers
                .iter()
                .any(|descriptor| descriptor.provider() == ProviderKind::Chat)
        {
            return Err(ConfigError::Missing("TASKMESH_SLACK_CHANNEL".to_owned()));
        }

        let model = self.anthropic_model;
        let summarizer = present_secret(self.anthropic_api_key.as_ref()).map(|key| SummarizerConfig {
            api_key: ApiKey::new(key.expose()),
            model,
        });

        Ok(AppConfig {
            bind_addr: self.bind_addr,
            database_url: present_secret(self.database_url.as_ref()),
            database_pool_size: self.database_pool_size,
            session_secret,
            client_url: self.client_url.trim().trim_end_matches('/').to_owned(),
            providers,
            slack_channel,
            provider_timeout: Duration::from_secs(self.provider_timeout_secs),
            adapter_timeout: Duration::from_secs(self.aggregate_timeout_secs),
            api_bases: ApiBases {
                github: self.github_api_base,
                gmail: self.gmail_api_base,
                slack: self.slack_api_base,
                anthropic: self.anthropic_api_base,
            },
            summarizer,
        })
    }

    fn client_fields(&self, provider: ProviderKind) -> ClientFields<'_> {
        match provider {
            ProviderKind::Tracker => (
                self.github_client_id.as_deref(),
                self.github_client_secret.as_ref(),
                self.github_redirect_uri.as_deref(),
            ),
            ProviderKind::Mailbox => (
                self.gmail_client_id.as_deref(),
                self.gmail_client_secret.as_ref(),
                self.gmail_redirect_uri.as_deref(),
            ),
            ProviderKind::Chat => (
                self.slack_client_id.as_deref(),
                self.slack_client_secret.as_ref(),
                self.slack_redirect_uri.as_deref(),
            ),
        }
    }

    fn client_credentials(
        &self,
        provider: ProviderKind,
    ) -> Result<Option<ClientCredentials>, ConfigError> {
        let (client_id, client_secret, redirect_uri) = self.client_fields(provider);
        let Some(client_id) = present(client_id) else {
            return Ok(None);
        };
        let client_secret = present_secret(client_secret).ok_or_else(|| {
            ConfigError::Missing(format!(
                "TASKMESH_{}_CLIENT_SECRET",
                provider.as_str().to_ascii_uppercase()
            ))
        })?;
        let redirect_uri = present(redirect_uri).unwrap_or_else(|| {
            format!(
                "{}/auth/{}/callback",
                self.public_url.trim().trim_end_matches('/'),
                provider.as_str()
            )
        });
        Ok(Some(ClientCredentials::new(
            client_id,
            ClientSecret::new(client_secret.expose()),
            redirect_uri,
        )))
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

fn present_secret(value: Option<&Secret>) -> Option<Secret> {
    value.filter(|secret| !secret.expose().is_empty()).cloned()
}
