//! Unit tests for provider adapters and credential storage.


use crate::provider::{adapters::http::build_client, domain::AccessToken};
use std::time::Duration;

fn test_client() -> reqwest::Client {
    build_client(Duration::from_secs(2)).expect("client builds")
}

fn token() -> AccessToken {
    AccessToken::new("provider-token").expect("non-empty token")
}
