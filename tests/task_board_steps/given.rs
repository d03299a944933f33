//! Given steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use chrono::NaiveDate;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::services::{CreateTaskRequest, TransitionTaskRequest};

/// Due date given to tasks whose schedule the scenario does not name.
const DUE_DATE: &str = "2030-01-31";

fn parse_date(text: &str) -> Result<NaiveDate, eyre::Report> {
    text.parse()
        .wrap_err_with(|| format!("invalid scenario date {text:?}"))
}

#[given("an empty board")]
fn empty_board(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.service.snapshot()?.is_empty(), "store is not empty");
    Ok(())
}

#[given(r#"a task "{title}" in status "{status}""#)]
fn task_in_status(
    world: &mut TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let request =
        CreateTaskRequest::new(title.as_str(), "Jane Smith").with_due_date(parse_date(DUE_DATE)?);
    let created = world
        .service
        .create(request)
        .wrap_err("create task for board scenario")?;
    world
        .service
        .transition(TransitionTaskRequest::new(created.id(), status))
        .wrap_err("move task into scenario status")?;
    world.task_ids.insert(title, created.id());
    Ok(())
}

#[given(r#"a task "{title}" scheduled from "{start}" to "{due}""#)]
fn scheduled_task(
    world: &mut TaskBoardWorld,
    title: String,
    start: String,
    due: String,
) -> Result<(), eyre::Report> {
    let created = world
        .service
        .create(
            CreateTaskRequest::new(title.as_str(), "David Brown")
                .with_start_date(parse_date(&start)?)
                .with_due_date(parse_date(&due)?),
        )
        .wrap_err("create scheduled task for board scenario")?;
    world.task_ids.insert(title, created.id());
    Ok(())
}
