//! Shared outbound HTTP plumbing for provider adapters.
//!
//! Every adapter classifies failures the same way: transport errors and
//! timeouts are [`ProviderError::Unavailable`], `401`/`403` responses are
//! [`ProviderError::AuthInvalid`], other non-success statuses are
//! `Unavailable`, and bodies that do not decode are
//! [`ProviderError::Malformed`].

use crate::provider::domain::{ProviderError, ProviderKind, ProviderResult};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default per-call timeout for provider requests.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("taskmesh/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client with a per-request timeout.
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] when the TLS backend cannot be
/// initialised.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Sends `request` and decodes a JSON body, classifying every failure.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: ProviderKind,
    request: RequestBuilder,
) -> ProviderResult<T> {
    let response = request
        .send()
        .await
        .map_err(|err| ProviderError::unavailable(provider, describe_transport(&err)))?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::AuthInvalid { provider });
    }
    if !status.is_success() {
        return Err(ProviderError::unavailable(provider, format!("HTTP {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| ProviderError::unavailable(provider, describe_transport(&err)))?;
    serde_json::from_slice(&body).map_err(|err| ProviderError::malformed(provider, err.to_string()))
}

/// Describes a transport error without the request URL.
pub(crate) fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_owned()
    } else if err.is_connect() {
        "connection failed".to_owned()
    } else if err.is_decode() {
        "response body could not be read".to_owned()
    } else {
        "request failed".to_owned()
    }
}
