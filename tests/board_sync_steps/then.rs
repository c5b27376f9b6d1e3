//! Then steps for board synchronisation scenarios.

use super::world::{BoardWorld, parse_status, parse_task_id};
use kanban_board::board::{
    domain::{BoardDomainError, TaskStatus},
    ports::TaskDocument,
    services::BoardError,
};
use rstest_bdd_macros::then;

fn column_titles(world: &BoardWorld, column: &str) -> Result<Vec<String>, eyre::Report> {
    let status = parse_status(column)?;
    let columns = world.board()?.columns();
    Ok(columns
        .column(status)
        .iter()
        .map(|task| task.title().to_owned())
        .collect())
}

#[then(r#"the "{column}" column lists only "{title}""#)]
fn column_lists_only(
    world: &BoardWorld,
    column: String,
    title: String,
) -> Result<(), eyre::Report> {
    let titles = column_titles(world, &column)?;
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected only {title:?} in {column}, found {titles:?}"));
    }
    Ok(())
}

#[then(r#"the "{column}" column includes "{title}""#)]
fn column_includes(world: &BoardWorld, column: String, title: String) -> Result<(), eyre::Report> {
    let titles = column_titles(world, &column)?;
    if !titles.contains(&title) {
        return Err(eyre::eyre!("expected {title:?} in {column}, found {titles:?}"));
    }
    for other in TaskStatus::ALL {
        if other.as_str() != column && column_titles(world, other.as_str())?.contains(&title) {
            return Err(eyre::eyre!("{title:?} also appears in {}", other.as_str()));
        }
    }
    Ok(())
}

#[then(r#"the "{column}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let titles = column_titles(world, &column)?;
    if !titles.is_empty() {
        return Err(eyre::eyre!("expected {column} to be empty, found {titles:?}"));
    }
    Ok(())
}

#[then("every column is empty")]
fn every_column_is_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let columns = world.board()?.columns();
    if !columns.is_empty() {
        return Err(eyre::eyre!("expected no visible tasks, found {}", columns.len()));
    }
    Ok(())
}

#[then("the task is rejected for its title")]
fn rejected_for_title(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(BoardError::Domain(BoardDomainError::EmptyTitle))) => Ok(()),
        other => Err(eyre::eyre!("expected an empty-title rejection, found {other:?}")),
    }
}

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.board()?.tasks().len();
    if actual != count {
        return Err(eyre::eyre!("expected {count} tasks, found {actual}"));
    }
    Ok(())
}

#[then("nothing was written to the task document")]
fn nothing_written(world: &BoardWorld) -> Result<(), eyre::Report> {
    let writes = world.documents.write_count()?;
    if writes != 0 {
        return Err(eyre::eyre!("expected no writes, found {writes}"));
    }
    Ok(())
}

#[then(r#"the stored task "{title}" has no due date"#)]
fn stored_task_without_due_date(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let document = world.stored()?;
    let stored = document
        .tasks
        .iter()
        .find(|task| task.title == title)
        .ok_or_else(|| eyre::eyre!("no stored task titled {title:?}"))?;
    let json = serde_json::to_value(stored)?;
    if json.get("dueDate").is_some() {
        return Err(eyre::eyre!("expected no dueDate key, found {json}"));
    }
    Ok(())
}

#[then("the task document matches the board")]
fn document_matches_board(world: &BoardWorld) -> Result<(), eyre::Report> {
    let expected = TaskDocument::encode(world.board()?.tasks());
    let stored = world.stored()?;
    if stored != expected {
        return Err(eyre::eyre!("stored document diverged from the board"));
    }
    Ok(())
}

#[then(r#"task "{id}" is in the "{column}" column"#)]
fn task_in_column(world: &BoardWorld, id: String, column: String) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(&id)?;
    let status = parse_status(&column)?;
    let task = world
        .board()?
        .task(&task_id)
        .ok_or_else(|| eyre::eyre!("task {id} missing"))?;
    if task.status() != status {
        return Err(eyre::eyre!(
            "expected task {id} in {column}, found {}",
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the other tasks are unchanged")]
fn other_tasks_unchanged(world: &BoardWorld) -> Result<(), eyre::Report> {
    let moved = world
        .moved_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was moved in this scenario"))?;
    let board = world.board()?;
    if board.tasks().len() != world.initial_tasks.len() {
        return Err(eyre::eyre!("task count changed"));
    }
    for (before, after) in world.initial_tasks.iter().zip(board.tasks()) {
        if before.id() != moved && before != after {
            return Err(eyre::eyre!("task {} changed unexpectedly", before.id()));
        }
    }
    Ok(())
}

#[then("an empty task document exists")]
fn empty_document_exists(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.stored()? != TaskDocument::empty() {
        return Err(eyre::eyre!("expected an empty task document"));
    }
    Ok(())
}
