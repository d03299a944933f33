//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestService, date, seed_sample_board, service, task_id};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskboard::task::{
    domain::{TaskPatch, TaskPolicy, TaskPriority, TaskStatus},
    ports::TaskRepositoryError,
    services::{
        CreateTaskRequest, TaskErrorKind, TaskLifecycleError, TaskLifecycleResult,
        TransitionTaskRequest, UpdateTaskRequest,
    },
};

#[rstest]
fn seeded_board_assigns_ids_in_creation_order(service: TestService) -> eyre::Result<()> {
    let tasks = seed_sample_board(&service)?;

    let ids: Vec<u64> = tasks.iter().map(|task| task.id().value()).collect();
    ensure!(ids == [1, 2, 3, 4, 5, 6]);
    let snapshot = service.snapshot()?;
    let stored: Vec<u64> = snapshot.iter().map(|task| task.id().value()).collect();
    ensure!(stored == ids, "store order changed: {stored:?}");
    Ok(())
}

#[rstest]
fn created_task_round_trips_every_field(service: TestService) -> eyre::Result<()> {
    let created = service.create(
        CreateTaskRequest::new("API Integration", "Jane Smith")
            .with_description("Integrate payment gateway API")
            .with_priority(TaskPriority::High)
            .with_start_date(date(2023, 6, 1))
            .with_due_date(date(2023, 6, 25))
            .with_tags(vec!["Development".to_owned(), "API".to_owned()]),
    )?;

    let found = service
        .find(created.id())?
        .ok_or_eyre("created task should be stored")?;

    ensure!(found == created);
    ensure!(found.description() == "Integrate payment gateway API");
    ensure!(found.priority() == TaskPriority::High);
    ensure!(found.status() == TaskStatus::Pending);
    ensure!(found.progress().value() == 0);
    Ok(())
}

#[rstest]
fn update_keeps_unsupplied_fields(service: TestService) -> eyre::Result<()> {
    let tasks = seed_sample_board(&service)?;
    let original = tasks.get(1).ok_or_eyre("seeded task 2")?;

    let updated = service.update(UpdateTaskRequest::new(
        original.id(),
        TaskPatch::new()
            .with_assignee("Mike Johnson")
            .with_due_date(date(2023, 6, 28)),
    ))?;

    ensure!(updated.assignee() == "Mike Johnson");
    ensure!(updated.due_date() == Some(date(2023, 6, 28)));
    ensure!(updated.title() == original.title());
    ensure!(updated.status() == original.status());
    ensure!(updated.start_date() == original.start_date());
    Ok(())
}

#[rstest]
#[case(150, 100)]
#[case(-5, 0)]
#[case(75, 75)]
fn progress_is_always_stored_in_range(
    service: TestService,
    #[case] raw: i64,
    #[case] stored: u8,
) -> eyre::Result<()> {
    seed_sample_board(&service)?;

    service.set_progress(task_id(2), raw)?;

    let task = service.find(task_id(2))?.ok_or_eyre("task 2 exists")?;
    ensure!(task.progress().value() == stored);
    Ok(())
}

#[rstest]
fn strict_service_rejects_out_of_range_progress(service: TestService) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    let strict = service.with_policy(TaskPolicy::strict());

    let result = strict.update(UpdateTaskRequest::new(
        task_id(2),
        TaskPatch::new().with_progress(150),
    ));

    ensure!(
        result.as_ref().map_err(TaskLifecycleError::kind).err()
            == Some(TaskErrorKind::InvalidInput)
    );
    let task = strict.find(task_id(2))?.ok_or_eyre("task 2 exists")?;
    ensure!(task.progress().value() == 0);
    Ok(())
}

#[rstest]
fn delete_returns_removed_task(service: TestService) -> eyre::Result<()> {
    seed_sample_board(&service)?;

    let removed = service.delete(task_id(4))?;

    ensure!(removed.title() == "Documentation");
    ensure!(service.find(task_id(4))?.is_none());
    ensure!(service.snapshot()?.len() == 5);
    Ok(())
}

#[rstest]
fn delete_unknown_task_leaves_store_unchanged(service: TestService) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    let before = service.snapshot()?;

    let result = service.delete(task_id(999));

    ensure!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)))
    ));
    ensure!(service.snapshot()? == before);
    Ok(())
}

#[rstest]
fn snapshots_are_not_affected_by_later_commands(service: TestService) -> eyre::Result<()> {
    seed_sample_board(&service)?;
    let before = service.snapshot()?;

    service.transition(TransitionTaskRequest::new(task_id(4), "in-progress"))?;
    service.delete(task_id(6))?;

    ensure!(before.len() == 6);
    ensure!(before.get(task_id(4)).map(|task| task.status()) == Some(TaskStatus::Pending));
    ensure!(service.snapshot()?.revision() > before.revision());
    Ok(())
}

#[rstest]
fn concurrent_commands_on_one_task_keep_every_change(service: TestService) -> eyre::Result<()> {
    const WRITERS: usize = 8;
    const TAGS_PER_WRITER: usize = 25;

    let task = service.create(
        CreateTaskRequest::new("Release", "Sarah Williams").with_due_date(date(2023, 7, 31)),
    )?;
    let id = task.id();

    std::thread::scope(|scope| {
        let writers: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let shared = &service;
                scope.spawn(move || -> TaskLifecycleResult<()> {
                    for tag in 0..TAGS_PER_WRITER {
                        shared.add_tag(id, &format!("writer-{writer}-tag-{tag}"))?;
                    }
                    shared.set_progress(id, 10)?;
                    Ok(())
                })
            })
            .collect();
        writers.into_iter().try_for_each(|writer| {
            writer
                .join()
                .map_err(|_| eyre::eyre!("writer thread panicked"))?
                .map_err(eyre::Report::from)
        })
    })?;

    let stored = service.find(id)?.ok_or_eyre("task should still be stored")?;
    ensure!(
        stored.tags().len() == WRITERS * TAGS_PER_WRITER,
        "lost tag edits: {} stored",
        stored.tags().len()
    );
    ensure!(stored.progress().value() == 10);
    Ok(())
}
