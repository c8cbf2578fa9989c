//! When steps for unified task view scenarios.

use super::world::AggregateWorld;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the user requests the aggregate view")]
fn request_aggregate(world: &mut AggregateWorld) -> Result<(), eyre::Report> {
    let response = world
        .send("GET", "/tasks", None, true)
        .wrap_err("request aggregate view")?;
    world.last_response = Some(response);
    Ok(())
}

#[when("the tracker callback arrives with a forged state")]
fn forged_callback(world: &mut AggregateWorld) -> Result<(), eyre::Report> {
    let response = world
        .send(
            "GET",
            "/auth/github/callback?code=scenario-code&state=eyJhbGciOiJub25lIn0.e30.c2ln",
            None,
            false,
        )
        .wrap_err("deliver forged callback")?;
    world.last_response = Some(response);
    Ok(())
}
