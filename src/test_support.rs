//! Shared fixtures for unit tests.

use crate::task::domain::{
    PersistedTaskData, Progress, TagSet, Task, TaskId, TaskPriority, TaskStatus,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

mockall::mock! {
    pub Clock {}

    impl mockable::Clock for Clock {
        fn local(&self) -> DateTime<Local>;
        fn utc(&self) -> DateTime<Utc>;
    }
}

/// Builds a calendar date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Builds a clock frozen at 09:00 UTC on the given day.
pub fn clock_on(day: NaiveDate) -> MockClock {
    let instant = Utc
        .from_utc_datetime(&day.and_hms_opt(9, 0, 0).expect("valid time of day"));
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(instant);
    clock
        .expect_local()
        .return_const(instant.with_timezone(&Local));
    clock
}

/// Builds a stored task with the given schedule.
pub fn stored_task(
    id: u64,
    title: &str,
    status: TaskStatus,
    schedule: Option<(NaiveDate, NaiveDate)>,
) -> Task {
    let created_at = Utc
        .with_ymd_and_hms(2023, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id).expect("positive task id"),
        title: title.to_owned(),
        description: String::new(),
        status,
        priority: TaskPriority::Medium,
        progress: Progress::NONE,
        assignee: "Jane Smith".to_owned(),
        start_date: schedule.map(|(start, _)| start),
        due_date: schedule.map(|(_, due)| due),
        tags: TagSet::new(),
        created_at,
        updated_at: created_at,
    })
}
