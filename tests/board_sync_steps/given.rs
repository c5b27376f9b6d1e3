//! Given steps for board synchronisation scenarios.

use super::world::{BoardWorld, run_async, sample_tasks};
use eyre::WrapErr;
use kanban_board::board::{
    adapters::memory::InMemoryTaskDocumentStore, ports::TaskDocument, services::BoardViewModel,
};
use rstest_bdd_macros::given;

#[given("the sample board")]
fn the_sample_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let tasks = sample_tasks()?;
    world.documents =
        InMemoryTaskDocumentStore::with_document(world.user.clone(), TaskDocument::encode(&tasks));
    let store = world.task_store();
    let loaded = run_async(store.load(&world.user)).wrap_err("load sample board")?;

    let mut board = BoardViewModel::new(store, world.user.clone());
    board.apply_snapshot(loaded);
    world.board = Some(board);
    world.initial_tasks = tasks;
    Ok(())
}

#[given("a user without a task document")]
fn user_without_document(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    if world.documents.document(&world.user)?.is_some() {
        return Err(eyre::eyre!("scenario world already holds a document"));
    }
    world.board = Some(BoardViewModel::new(world.task_store(), world.user.clone()));
    Ok(())
}
