//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, open_service, run_async};
use eyre::{WrapErr, ensure};
use rstest_bdd_macros::given;
use taskboard::board::domain::NewTask;

#[given(r#"a fresh board with columns "{first}", "{second}" and "{third}""#)]
fn fresh_board(
    world: &mut BoardWorld,
    first: String,
    second: String,
    third: String,
) -> Result<(), eyre::Report> {
    let service = open_service()?;
    let board = run_async(service.board());
    let titles: Vec<&str> = board.columns().map(|column| column.title()).collect();
    ensure!(
        titles == [first.as_str(), second.as_str(), third.as_str()],
        "unexpected seeded columns {titles:?}"
    );
    world.service = Some(service);
    Ok(())
}

#[given(r#"tasks "{a}", "{b}" and "{c}" in column "{column}""#)]
fn tasks_in_column(
    world: &mut BoardWorld,
    a: String,
    b: String,
    c: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column_titled(&column)?;
    for title in [a, b, c] {
        run_async(
            world
                .service()?
                .create_task(NewTask::new(title).in_column(column_id)),
        )
        .wrap_err("create seeded task")?;
    }
    Ok(())
}

#[given(r#"the task "{title}" has been archived"#)]
fn task_archived(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    run_async(world.service()?.archive_task(task.id())).wrap_err("archive seeded task")?;
    Ok(())
}
