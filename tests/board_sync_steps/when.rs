//! When steps for board synchronisation scenarios.

use std::time::Duration;

use super::world::{BoardWorld, parse_status, parse_task_id, run_async};
use eyre::WrapErr;
use kanban_board::board::domain::TaskDraft;
use rstest_bdd_macros::when;

#[when(r#"the search text is "{query}""#)]
fn search_text_is(world: &mut BoardWorld, query: String) -> Result<(), eyre::Report> {
    world.board_mut()?.set_search(query);
    Ok(())
}

#[when("a task with a blank title is added")]
fn add_blank_title(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board_mut()?;
    let result = run_async(board.add_task(TaskDraft::new("   "))).map(|_| ());
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"a task titled "{title}" is added to "{column}""#)]
fn add_task_to_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let status = parse_status(&column)?;
    let board = world.board_mut()?;
    run_async(board.add_task(TaskDraft::new(title).with_status(status)))
        .wrap_err("add task")?;
    Ok(())
}

#[when(r#"task "{id}" is dragged to "{column}""#)]
fn drag_task(world: &mut BoardWorld, id: String, column: String) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(&id)?;
    let status = parse_status(&column)?;
    let board = world.board_mut()?;
    board.pick_up(&task_id).wrap_err("pick up task")?;
    let moved = run_async(board.drop_on(status)).wrap_err("drop task")?;
    if !moved {
        return Err(eyre::eyre!("drop did not move task {id}"));
    }
    world.moved_task = Some(task_id);
    Ok(())
}

#[when(r#"task "{id}" is deleted"#)]
fn delete_task(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(&id)?;
    let board = world.board_mut()?;
    run_async(board.delete_task(&task_id)).wrap_err("delete task")?;
    Ok(())
}

#[when("the board syncs")]
fn board_syncs(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let store = world.task_store();
    let user = world.user.clone();
    let event = run_async(async move {
        let mut sync = store.open(user).await.wrap_err("open task sync")?;
        let first = tokio::time::timeout(Duration::from_secs(5), sync.next_event())
            .await
            .wrap_err("wait for first sync event")?;
        Ok::<_, eyre::Report>(first)
    })?
    .ok_or_else(|| eyre::eyre!("sync ended before its first event"))?;
    world.board_mut()?.apply_event(event);
    Ok(())
}
