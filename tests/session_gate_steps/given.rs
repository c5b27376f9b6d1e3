//! Given steps for session gate scenarios.

use super::world::{SessionWorld, identity};
use rstest_bdd_macros::given;

#[given("no user is signed in")]
fn no_user_signed_in(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    world.provider.sign_out()?;
    Ok(())
}

#[given(r#""{user_id}" is already signed in"#)]
fn already_signed_in(world: &mut SessionWorld, user_id: String) -> Result<(), eyre::Report> {
    world.provider.set_identity(Some(identity(&user_id)?))?;
    Ok(())
}

#[given(r#"the next sign-in succeeds as "{user_id}""#)]
fn next_sign_in_succeeds(world: &mut SessionWorld, user_id: String) -> Result<(), eyre::Report> {
    world.provider.script_sign_in(Ok(identity(&user_id)?))?;
    Ok(())
}
