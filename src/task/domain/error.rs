//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The assignee is empty after trimming.
    #[error("task assignee must not be empty")]
    EmptyAssignee,

    /// A new task was submitted without a due date.
    #[error("task due date is required")]
    MissingDueDate,

    /// A tag is empty after trimming.
    #[error("task tag must not be empty")]
    EmptyTag,

    /// Progress lies outside the 0-100 range and the policy rejects it.
    #[error("progress {0} is out of range, expected 0-100")]
    ProgressOutOfRange(i64),

    /// The start date falls after the due date and the policy rejects it.
    #[error("start date {start} is after due date {due}")]
    StartAfterDue {
        /// Requested start date.
        start: NaiveDate,
        /// Requested due date.
        due: NaiveDate,
    },

    /// The requested status change is not permitted by the policy.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task whose status change was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing a task status from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
