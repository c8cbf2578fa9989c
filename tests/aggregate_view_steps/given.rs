//! Given steps for unified task view scenarios.

use super::world::{AggregateWorld, run_async};
use axum::http::StatusCode;
use eyre::WrapErr;
use mockito::Matcher;
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a signed-in user with a local task "{title}""#)]
fn user_with_local_task(world: &mut AggregateWorld, title: String) -> Result<(), eyre::Report> {
    let response = world
        .send("POST", "/tasks", Some(json!({ "title": title })), true)
        .wrap_err("create local task")?;
    if response.status != StatusCode::CREATED {
        return Err(eyre::eyre!(
            "expected 201 creating a task, got {}",
            response.status
        ));
    }
    Ok(())
}

#[given(
    r#"the tracker assigns issues "{first}" and "{second}" and has an open pull request "{pull}""#
)]
fn tracker_with_items(world: &mut AggregateWorld, first: String, second: String, pull: String) {
    let issues = json!([
        { "title": first, "html_url": "https://github.test/o/r/issues/1" },
        { "title": second, "html_url": "https://github.test/o/r/issues/2" }
    ]);
    let pulls = json!({
        "total_count": 1,
        "items": [{ "title": pull, "html_url": "https://github.test/o/r/pull/3" }]
    });
    let server = &mut world.server;
    run_async(
        server
            .mock("GET", "/user")
            .with_body(r#"{"login": "octocat"}"#)
            .create_async(),
    );
    run_async(
        server
            .mock("GET", "/issues")
            .match_query(Matcher::Any)
            .with_body(issues.to_string())
            .create_async(),
    );
    run_async(
        server
            .mock("GET", "/search/issues")
            .match_query(Matcher::Any)
            .with_body(pulls.to_string())
            .create_async(),
    );
}

#[given("the tracker rejects the stored token")]
fn tracker_rejects_token(world: &mut AggregateWorld) {
    let server = &mut world.server;
    run_async(
        server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async(),
    );
    for path in ["/issues", "/search/issues"] {
        run_async(
            server
                .mock("GET", path)
                .match_query(Matcher::Any)
                .with_status(401)
                .create_async(),
        );
    }
}

#[given("the user has linked the tracker")]
fn user_linked_tracker(world: &mut AggregateWorld) -> Result<(), eyre::Report> {
    run_async(
        world
            .server
            .mock("POST", "/login/oauth/access_token")
            .match_query(Matcher::Any)
            .with_body(r#"{"access_token": "gho_scenario", "token_type": "bearer"}"#)
            .create_async(),
    );

    let authorize = world
        .send("GET", "/auth/github", None, true)
        .wrap_err("start authorization")?;
    let url = authorize.body["url"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("authorization response has no url"))?;
    let state = reqwest::Url::parse(url)?
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| eyre::eyre!("authorization url has no state"))?;

    let callback = world
        .send(
            "GET",
            &format!("/auth/github/callback?code=scenario-code&state={state}"),
            None,
            false,
        )
        .wrap_err("complete authorization")?;
    let expected = format!("{}/dashboard?github=success", super::world::CLIENT_URL);
    if callback.location.as_deref() != Some(expected.as_str()) {
        return Err(eyre::eyre!(
            "expected redirect to {expected}, got {:?}",
            callback.location
        ));
    }
    Ok(())
}
