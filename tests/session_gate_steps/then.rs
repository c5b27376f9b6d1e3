//! Then steps for session gate scenarios.

use std::time::Duration;

use super::world::{SessionWorld, parse_route, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(r#"the route is "{route}""#)]
fn route_is(world: &SessionWorld, route: String) -> Result<(), eyre::Report> {
    let expected = parse_route(&route)?;
    let mut watcher = world.gate()?.watch();
    run_async(async {
        tokio::time::timeout(
            Duration::from_secs(5),
            watcher.wait_for(|state| state.route() == expected),
        )
        .await
        .wrap_err_with(|| format!("route never became {route}"))?
        .wrap_err("session gate stopped publishing")?;
        Ok::<_, eyre::Report>(())
    })
}

#[then(r#"the signed-in user is "{user_id}""#)]
fn signed_in_user_is(world: &SessionWorld, user_id: String) -> Result<(), eyre::Report> {
    let state = world.gate()?.state();
    let actual = state.user_id().map(|id| id.as_str().to_owned());
    if actual.as_deref() != Some(user_id.as_str()) {
        return Err(eyre::eyre!("expected {user_id:?} signed in, found {actual:?}"));
    }
    Ok(())
}

#[then("sign-in reports a retryable failure")]
fn sign_in_failed_retryably(world: &SessionWorld) -> Result<(), eyre::Report> {
    match world.last_sign_in.as_ref() {
        Some(Err(err)) if err.is_retryable() => Ok(()),
        other => Err(eyre::eyre!("expected a retryable sign-in failure, found {other:?}")),
    }
}
