//! Configurable invariants applied to task mutations.
//!
//! The dashboard this store backs never constrained progress input, date
//! ordering, or status changes. Each of those gaps is surfaced here as an
//! explicit policy knob; the default reproduces the permissive behaviour and
//! [`TaskPolicy::strict`] turns every check on.

use super::{Progress, TaskDomainError, TaskId, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Handling of progress values outside 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Out-of-range values are clamped into range.
    #[default]
    Clamp,
    /// Out-of-range values are rejected.
    Reject,
}

/// Ordering constraint between start and due dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrderPolicy {
    /// Any pair of dates is accepted.
    #[default]
    Unchecked,
    /// The start date must not fall after the due date.
    StartNotAfterDue,
}

/// Legality rule for status changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Unrestricted,
    /// Only moves allowed by [`TaskStatus::can_transition_to`] succeed.
    Guarded,
}

/// Invariant set enforced by the lifecycle service.
///
/// # Examples
///
/// ```
/// use taskboard::task::domain::{ProgressPolicy, TaskPolicy, TransitionPolicy};
///
/// let policy = TaskPolicy::default();
/// assert_eq!(policy.progress, ProgressPolicy::Clamp);
///
/// let strict = TaskPolicy::strict();
/// assert_eq!(strict.transitions, TransitionPolicy::Guarded);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPolicy {
    /// Progress range handling.
    pub progress: ProgressPolicy,
    /// Start/due ordering constraint.
    pub date_order: DateOrderPolicy,
    /// Status change legality.
    pub transitions: TransitionPolicy,
}

impl TaskPolicy {
    /// Creates a policy enforcing every invariant.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            progress: ProgressPolicy::Reject,
            date_order: DateOrderPolicy::StartNotAfterDue,
            transitions: TransitionPolicy::Guarded,
        }
    }

    /// Converts raw progress input into a stored value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] when the value lies
    /// outside 0-100 under [`ProgressPolicy::Reject`].
    pub fn resolve_progress(self, raw: i64) -> Result<Progress, TaskDomainError> {
        match self.progress {
            ProgressPolicy::Clamp => Ok(Progress::clamped(raw)),
            ProgressPolicy::Reject => Progress::try_from(raw),
        }
    }

    /// Checks the start/due pair against the date-order rule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StartAfterDue`] when both dates are set,
    /// the start follows the due date, and ordering is enforced.
    pub fn check_dates(
        self,
        start: Option<NaiveDate>,
        due: Option<NaiveDate>,
    ) -> Result<(), TaskDomainError> {
        if self.date_order == DateOrderPolicy::Unchecked {
            return Ok(());
        }
        match (start, due) {
            (Some(start_date), Some(due_date)) if start_date > due_date => {
                Err(TaskDomainError::StartAfterDue {
                    start: start_date,
                    due: due_date,
                })
            }
            _ => Ok(()),
        }
    }

    /// Checks a status change against the transition rule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the move is
    /// outside the guarded table.
    pub fn check_transition(
        self,
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<(), TaskDomainError> {
        match self.transitions {
            TransitionPolicy::Unrestricted => Ok(()),
            TransitionPolicy::Guarded if from == to || from.can_transition_to(to) => Ok(()),
            TransitionPolicy::Guarded => {
                Err(TaskDomainError::InvalidStatusTransition { task_id, from, to })
            }
        }
    }
}
