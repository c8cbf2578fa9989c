//! Then steps for unified task view scenarios.

use super::world::{AggregateWorld, CLIENT_URL, Captured, run_async};
use axum::http::StatusCode;
use rstest_bdd_macros::then;
use serde_json::{Value, json};
use taskmesh::provider::ports::CredentialStore;

fn aggregate(world: &AggregateWorld) -> Result<&Value, eyre::Report> {
    let response: &Captured = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no response captured in scenario world"))?;
    if response.status != StatusCode::OK {
        return Err(eyre::eyre!("expected 200, got {}", response.status));
    }
    Ok(&response.body)
}

fn provider_status<'a>(body: &'a Value, provider: &str) -> Result<&'a Value, eyre::Report> {
    body["providers"]
        .as_array()
        .and_then(|statuses| {
            statuses
                .iter()
                .find(|status| status["provider"] == provider)
        })
        .ok_or_else(|| eyre::eyre!("no status reported for {provider}"))
}

#[then(r#"the view lists "{titles}""#)]
fn view_lists(world: &AggregateWorld, titles: String) -> Result<(), eyre::Report> {
    let body = aggregate(world)?;
    let actual: Vec<&str> = body["tasks"]
        .as_array()
        .ok_or_else(|| eyre::eyre!("tasks is not an array"))?
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect();
    let expected: Vec<&str> = titles.split(" | ").collect();
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, got {actual:?}"));
    }
    Ok(())
}

#[then("the tracker reports {count:u64} items")]
fn tracker_reports(world: &AggregateWorld, count: u64) -> Result<(), eyre::Report> {
    let status = provider_status(aggregate(world)?, "github")?;
    let expected = json!({ "provider": "github", "status": "fetched", "count": count });
    if *status != expected {
        return Err(eyre::eyre!("expected {expected}, got {status}"));
    }
    Ok(())
}

#[then("the mailbox and chat are not linked")]
fn others_not_linked(world: &AggregateWorld) -> Result<(), eyre::Report> {
    let body = aggregate(world)?;
    for provider in ["gmail", "slack"] {
        let status = provider_status(body, provider)?;
        if status["status"] != "not_linked" {
            return Err(eyre::eyre!("expected {provider} not linked, got {status}"));
        }
    }
    Ok(())
}

#[then("the tracker must be reconnected")]
fn tracker_reconnect(world: &AggregateWorld) -> Result<(), eyre::Report> {
    let body = aggregate(world)?;
    let status = provider_status(body, "github")?;
    if status["kind"] != "auth_invalid" {
        return Err(eyre::eyre!("expected auth_invalid failure, got {status}"));
    }
    if body["reconnect_required"] != json!(["github"]) {
        return Err(eyre::eyre!(
            "expected github in reconnect_required, got {}",
            body["reconnect_required"]
        ));
    }
    Ok(())
}

#[then(r#"the client is sent back with reason "{reason}""#)]
fn redirected_with_reason(world: &AggregateWorld, reason: String) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no response captured in scenario world"))?;
    let expected = format!("{CLIENT_URL}/dashboard?github=failed&reason={reason}");
    if response.status != StatusCode::SEE_OTHER || response.location.as_deref() != Some(&expected) {
        return Err(eyre::eyre!(
            "expected 303 to {expected}, got {} {:?}",
            response.status,
            response.location
        ));
    }
    Ok(())
}

#[then("the user has no linked providers")]
fn no_links(world: &AggregateWorld) -> Result<(), eyre::Report> {
    let links = run_async(world.credentials.links(world.user))?;
    if !links.is_empty() {
        return Err(eyre::eyre!("expected no links, found {}", links.len()));
    }
    Ok(())
}
