//! Headline task statistics for the dashboard cards.

use crate::task::{domain::TaskStatus, ports::TaskSnapshot};
use serde::Serialize;

/// Task counts and completion shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Number of tasks.
    pub total: usize,
    /// Tasks not yet started.
    pub pending: usize,
    /// Tasks underway.
    pub in_progress: usize,
    /// Finished tasks.
    pub completed: usize,
    /// Blocked tasks.
    pub blocked: usize,
    /// Completed tasks as a rounded percentage of the total.
    pub completed_percent: u8,
    /// In-progress tasks as a rounded percentage of the total.
    pub in_progress_percent: u8,
    /// Mean task progress, rounded.
    pub average_progress: u8,
}

impl TaskSummary {
    /// Computes the summary of `snapshot`. An empty snapshot yields zeroes.
    #[must_use]
    pub fn project(snapshot: &TaskSnapshot) -> Self {
        let count = |status: TaskStatus| {
            snapshot
                .iter()
                .filter(|task| task.status() == status)
                .count()
        };
        let total = snapshot.len();
        let completed = count(TaskStatus::Completed);
        let in_progress = count(TaskStatus::InProgress);
        let progress_sum: u64 = snapshot
            .iter()
            .map(|task| u64::from(task.progress().value()))
            .sum();

        Self {
            total,
            pending: count(TaskStatus::Pending),
            in_progress,
            completed,
            blocked: count(TaskStatus::Blocked),
            completed_percent: percent_of(completed, total),
            in_progress_percent: percent_of(in_progress, total),
            average_progress: to_percent(rounded_ratio(progress_sum, widen(total))),
        }
    }
}

/// Rounds `part / whole * 100` half-up.
fn percent_of(part: usize, whole: usize) -> u8 {
    to_percent(rounded_ratio(widen(part).saturating_mul(100), widen(whole)))
}

/// Rounds `numerator / denominator` half-up, returning zero for an empty
/// denominator.
fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    numerator
        .saturating_mul(2)
        .saturating_add(denominator)
        .checked_div(denominator.saturating_mul(2))
        .unwrap_or(0)
}

fn widen(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn to_percent(value: u64) -> u8 {
    u8::try_from(value.min(100)).unwrap_or(100)
}
