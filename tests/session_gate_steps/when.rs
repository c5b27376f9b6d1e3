//! When steps for session gate scenarios.

use std::sync::Arc;

use super::world::{SessionWorld, run_async};
use eyre::WrapErr;
use kanban_board::session::services::SessionGate;
use rstest_bdd_macros::when;

#[when("the session gate starts")]
fn gate_starts(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    let gate = SessionGate::start(Arc::clone(&world.provider)).wrap_err("start session gate")?;
    world.gate = Some(gate);
    Ok(())
}

#[when("the user signs in")]
fn user_signs_in(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.gate()?.sign_in());
    world.last_sign_in = Some(result);
    Ok(())
}

#[when("the provider signs the user out")]
fn provider_signs_out(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    world.provider.sign_out()?;
    Ok(())
}
