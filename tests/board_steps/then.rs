//! Then steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::{ensure, eyre};
use rstest_bdd_macros::then;
use taskboard::board::{domain::BoardDomainError, services::BoardServiceError};

fn as_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[then(r#"the task "{title}" sits in column "{column}" with priority "{priority}""#)]
fn task_in_column_with_priority(
    world: &BoardWorld,
    title: String,
    column: String,
    priority: String,
) -> Result<(), eyre::Report> {
    assert_task_in_column(world, &title, &column)?;
    let task = world.task_titled(&title)?;
    ensure!(
        task.priority().as_str() == priority,
        "expected priority {priority}, found {}",
        task.priority()
    );
    Ok(())
}

#[then(r#"the task "{title}" is in column "{column}""#)]
fn task_in_column(world: &BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    assert_task_in_column(world, &title, &column)
}

fn assert_task_in_column(world: &BoardWorld, title: &str, column: &str) -> Result<(), eyre::Report> {
    let task = world.task_titled(title)?;
    let expected = world.column_titled(column)?;
    let actual = run_async(world.service()?.board()).column_of(task.id());
    ensure!(
        actual == Some(expected),
        "expected {title} in {column}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"column "{column}" lists "{title}" first"#)]
fn column_lists_first(world: &BoardWorld, column: String, title: String) -> Result<(), eyre::Report> {
    let id = world.column_titled(&column)?;
    let board = run_async(world.service()?.board());
    let first = board
        .column(id)
        .and_then(|found| found.task_ids().first().copied())
        .and_then(|task_id| board.task(task_id))
        .map(|task| task.title().to_owned());
    ensure!(
        first.as_deref() == Some(title.as_str()),
        "expected {title} first in {column}, found {first:?}"
    );
    Ok(())
}

#[then("the board holds {count:u64} active tasks")]
fn active_task_count(world: &BoardWorld, count: u64) -> Result<(), eyre::Report> {
    let actual = as_count(run_async(world.service()?.board()).active_task_count());
    ensure!(actual == count, "expected {count} active tasks, found {actual}");
    Ok(())
}

#[then("the archive holds {count:u64} tasks")]
fn archive_count(world: &BoardWorld, count: u64) -> Result<(), eyre::Report> {
    let actual = as_count(run_async(world.service()?.archive()).len());
    ensure!(actual == count, "expected {count} archived tasks, found {actual}");
    Ok(())
}

#[then("the last sync created {count:u64} tasks")]
fn last_sync_created(world: &BoardWorld, count: u64) -> Result<(), eyre::Report> {
    let summary = world
        .last_sync
        .ok_or_else(|| eyre!("missing sync summary in scenario world"))?;
    ensure!(
        as_count(summary.created) == count,
        "expected {count} created tasks, found {}",
        summary.created
    );
    Ok(())
}

#[then("the bulk operation succeeded for {succeeded:u64} tasks and failed for {failed:u64}")]
fn bulk_outcome(world: &BoardWorld, succeeded: u64, failed: u64) -> Result<(), eyre::Report> {
    let outcome = world
        .last_bulk
        .as_ref()
        .ok_or_else(|| eyre!("missing bulk outcome in scenario world"))?;
    ensure!(
        as_count(outcome.succeeded.len()) == succeeded,
        "expected {succeeded} successes, found {}",
        outcome.succeeded.len()
    );
    ensure!(
        as_count(outcome.failed.len()) == failed,
        "expected {failed} failures, found {}",
        outcome.failed.len()
    );
    Ok(())
}

#[then("the column deletion is rejected because it holds {count:u64} tasks")]
fn column_deletion_rejected(world: &BoardWorld, count: u64) -> Result<(), eyre::Report> {
    let result = world
        .last_column_deletion
        .as_ref()
        .ok_or_else(|| eyre!("missing column deletion result in scenario world"))?;
    let Err(BoardServiceError::Domain(BoardDomainError::ColumnNotEmpty { count: held, .. })) =
        result
    else {
        return Err(eyre!("expected a column-not-empty rejection, got {result:?}"));
    };
    ensure!(as_count(*held) == count, "expected {count} held tasks, found {held}");
    Ok(())
}

#[then(r#"column "{column}" no longer exists"#)]
fn column_missing(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let board = run_async(world.service()?.board());
    ensure!(
        board.find_column_by_title(&column).is_none(),
        "column {column} still exists"
    );
    Ok(())
}
