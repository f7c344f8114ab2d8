//! When steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::domain::{
    BulkOperation, ColumnDeletion, MoveTask, NewTask, TrackerCandidate, TrackerItemKind,
};

#[when(r#"the user creates a task titled "{title}""#)]
fn create_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    run_async(world.service()?.create_task(NewTask::new(title))).wrap_err("create task")?;
    Ok(())
}

#[when(r#"the task "{title}" is moved to the head of column "{column}""#)]
fn move_to_head(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let to = world.column_titled(&column)?;
    let service = world.service()?;
    let from = run_async(service.board())
        .column_of(task.id())
        .ok_or_else(|| eyre::eyre!("task {title} is not placed"))?;
    run_async(service.move_task(MoveTask::new(task.id(), from, to, 0))).wrap_err("move task")?;
    Ok(())
}

#[when(r#"the tracker reports issue "{key}" titled "{title}""#)]
fn tracker_reports_issue(
    world: &mut BoardWorld,
    key: String,
    title: String,
) -> Result<(), eyre::Report> {
    let url = format!("https://tracker.test/{key}");
    let candidate = TrackerCandidate::new(key, title, TrackerItemKind::Issue, url);
    let summary = run_async(world.service()?.run_sync(&[candidate])).wrap_err("run sync")?;
    world.last_sync = Some(summary);
    Ok(())
}

#[when(r#"the user archives "{a}", "{b}" and "{c}" in bulk"#)]
fn bulk_archive(
    world: &mut BoardWorld,
    a: String,
    b: String,
    c: String,
) -> Result<(), eyre::Report> {
    let ids = [
        world.any_task_id(&a)?,
        world.any_task_id(&b)?,
        world.any_task_id(&c)?,
    ];
    let outcome = run_async(world.service()?.bulk_apply(&ids, BulkOperation::Archive))
        .wrap_err("bulk archive")?;
    world.last_bulk = Some(outcome);
    Ok(())
}

#[when(r#"the user deletes column "{column}" without discarding tasks"#)]
fn delete_column_require_empty(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let id = world.column_titled(&column)?;
    let result = run_async(
        world
            .service()?
            .delete_column(id, ColumnDeletion::RequireEmpty),
    );
    world.last_column_deletion = Some(result);
    Ok(())
}

#[when(r#"the user deletes column "{column}" discarding its tasks"#)]
fn delete_column_discarding(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let id = world.column_titled(&column)?;
    let result = run_async(
        world
            .service()?
            .delete_column(id, ColumnDeletion::DiscardTasks),
    );
    world.last_column_deletion = Some(result);
    Ok(())
}

#[when(r#"the user restores the task "{title}""#)]
fn restore_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.any_task_id(&title)?;
    run_async(world.service()?.restore_task(id)).wrap_err("restore task")?;
    Ok(())
}
