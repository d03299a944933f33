//! Integration tests projecting the in-memory store onto board views.

use super::helpers::{TestService, date, seed_sample_board, service, task_id};
use eyre::{OptionExt, ensure};
use rstest::{fixture, rstest};
use taskboard::{
    board::{BoardProjector, GanttConfig, GanttLayout},
    task::{domain::TaskStatus, services::TransitionTaskRequest},
};

#[fixture]
fn projector() -> BoardProjector {
    BoardProjector::new(GanttConfig::default())
}

#[rstest]
fn kanban_counts_match_the_store(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    let snapshot = service.snapshot()?;

    let board = projector.kanban(&snapshot);

    ensure!(board.total() == snapshot.len());
    ensure!(board.column(TaskStatus::Pending).len() == 2);
    ensure!(board.column(TaskStatus::InProgress).len() == 2);
    ensure!(board.column(TaskStatus::Completed).len() == 1);
    ensure!(board.column(TaskStatus::Blocked).len() == 1);
    ensure!(board.revision() == snapshot.revision());
    Ok(())
}

#[rstest]
fn transition_moves_card_between_columns(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;

    service.transition(TransitionTaskRequest::new(task_id(2), "completed"))?;
    let board = projector.kanban(&service.snapshot()?);

    ensure!(board.locate(task_id(2)) == Some(TaskStatus::Completed));
    ensure!(!board.column(TaskStatus::InProgress).contains(task_id(2)));
    Ok(())
}

#[rstest]
fn kanban_drop_request_applies_through_the_service(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    let board = projector.kanban(&service.snapshot()?);

    let request = board
        .drop_request(task_id(5), TaskStatus::InProgress)
        .ok_or_eyre("card moves to another column")?;
    service.transition(request)?;

    let after = projector.kanban(&service.snapshot()?);
    ensure!(after.locate(task_id(5)) == Some(TaskStatus::InProgress));
    Ok(())
}

#[rstest]
fn deleted_task_disappears_from_every_view(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;

    service.delete(task_id(3))?;
    let snapshot = service.snapshot()?;
    let board = projector.kanban(&snapshot);
    let layout = projector.gantt(&snapshot);
    let timeline = layout.timeline().ok_or_eyre("remaining tasks are scheduled")?;

    ensure!(board.locate(task_id(3)).is_none());
    ensure!(board.total() == 5);
    ensure!(timeline.bar(task_id(3)).is_none());
    ensure!(timeline.bars().len() == 5);
    ensure!(projector.summary(&snapshot).total == 5);
    Ok(())
}

#[rstest]
fn gantt_spans_the_whole_sample_board(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    let snapshot = service.snapshot()?;

    let layout = projector.gantt(&snapshot);
    let timeline = layout.timeline().ok_or_eyre("sample board is scheduled")?;
    let deployment = timeline.bar(task_id(6)).ok_or_eyre("deployment bar")?;

    ensure!(timeline.min_start() == date(2023, 5, 8));
    ensure!(timeline.max_end() == date(2023, 8, 8));
    ensure!(timeline.span_days() == 92);
    ensure!(timeline.days().count() == 93);
    ensure!(deployment.offset_days() == 73);
    ensure!(deployment.duration_days() == 6);
    ensure!(projector.gantt(&snapshot) == layout);
    Ok(())
}

#[rstest]
fn empty_store_has_no_gantt_data(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    let layout = projector.gantt(&service.snapshot()?);

    ensure!(layout == GanttLayout::NoData);
    Ok(())
}

#[rstest]
fn summary_reports_completion_share(
    service: TestService,
    projector: BoardProjector,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    service.set_progress(task_id(1), 100)?;
    service.set_progress(task_id(2), 65)?;

    let summary = projector.summary(&service.snapshot()?);

    ensure!(summary.total == 6);
    ensure!(summary.completed == 1);
    ensure!(summary.completed_percent == 17);
    ensure!(summary.in_progress_percent == 33);
    ensure!(summary.average_progress == 28);
    Ok(())
}
