//! Task aggregate root and the value objects used to create and change it.

use super::{Progress, TagSet, TaskDomainError, TaskId, TaskPolicy, TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Serialize;

/// Validated field set for a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    assignee: String,
    priority: TaskPriority,
    start_date: Option<NaiveDate>,
    due_date: NaiveDate,
    tags: TagSet,
}

impl TaskDraft {
    /// Creates a draft from the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyAssignee`] when either value is blank.
    pub fn new(
        title: impl Into<String>,
        assignee: impl Into<String>,
        due_date: NaiveDate,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: required_text(&title.into(), TaskDomainError::EmptyTitle)?,
            description: String::new(),
            assignee: required_text(&assignee.into(), TaskDomainError::EmptyAssignee)?,
            priority: TaskPriority::default(),
            start_date: None,
            due_date,
            tags: TagSet::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets an explicit start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Returns the requested start date, if one was given.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}

/// Partial field update for an existing task.
///
/// Only the fields that were set are applied. Date fields distinguish
/// between "leave alone" and "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    priority: Option<TaskPriority>,
    progress: Option<i64>,
    start_date: Option<Option<NaiveDate>>,
    due_date: Option<Option<NaiveDate>>,
    tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the progress with a raw, not yet validated, percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(Some(start_date));
        self
    }

    /// Removes the start date.
    #[must_use]
    pub const fn clear_start_date(mut self) -> Self {
        self.start_date = Some(None);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the whole tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Task aggregate root.
///
/// Tasks serialize for the shell but are never deserialized; storage
/// adapters rebuild them through [`Task::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    progress: Progress,
    assignee: String,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    tags: TagSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task from stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: String,
    /// Stored status.
    pub status: TaskStatus,
    /// Stored priority.
    pub priority: TaskPriority,
    /// Stored progress.
    pub progress: Progress,
    /// Stored assignee.
    pub assignee: String,
    /// Stored start date, if any.
    pub start_date: Option<NaiveDate>,
    /// Stored due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Stored tags.
    pub tags: TagSet,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task with zero progress from a validated draft.
    ///
    /// A draft without a start date starts on the clock's current UTC date.
    #[must_use]
    pub fn create(id: TaskId, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: TaskStatus::Pending,
            priority: draft.priority,
            progress: Progress::NONE,
            assignee: draft.assignee,
            start_date: Some(draft.start_date.unwrap_or_else(|| timestamp.date_naive())),
            due_date: Some(draft.due_date),
            tags: draft.tags,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            progress: data.progress,
            assignee: data.assignee,
            start_date: data.start_date,
            due_date: data.due_date,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the assignee.
    #[must_use]
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Returns the start date, if set.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the start and due dates when both are set.
    #[must_use]
    pub const fn schedule(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.due_date) {
            (Some(start), Some(due)) => Some((start, due)),
            _ => None,
        }
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// Every field is validated before any is written, so a rejected patch
    /// leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when a replacement value is blank, the
    /// progress or date order violates `policy`, or a tag is blank.
    pub fn apply(
        &mut self,
        patch: TaskPatch,
        policy: TaskPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let title = patch
            .title
            .map(|value| required_text(&value, TaskDomainError::EmptyTitle))
            .transpose()?;
        let assignee = patch
            .assignee
            .map(|value| required_text(&value, TaskDomainError::EmptyAssignee))
            .transpose()?;
        let progress = patch
            .progress
            .map(|raw| policy.resolve_progress(raw))
            .transpose()?;
        let tags = patch.tags.map(TagSet::from_labels).transpose()?;
        let start_date = patch.start_date.unwrap_or(self.start_date);
        let due_date = patch.due_date.unwrap_or(self.due_date);
        policy.check_dates(start_date, due_date)?;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = patch.description {
            self.description = value;
        }
        if let Some(value) = assignee {
            self.assignee = value;
        }
        if let Some(value) = patch.priority {
            self.priority = value;
        }
        if let Some(value) = progress {
            self.progress = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        self.start_date = start_date;
        self.due_date = due_date;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to `target`.
    ///
    /// Returns `false` without touching the task when it already has the
    /// target status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when `policy`
    /// forbids the move.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        policy: TaskPolicy,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        if self.status == target {
            return Ok(false);
        }
        policy.check_transition(self.id, self.status, target)?;
        self.status = target;
        self.touch(clock);
        Ok(true)
    }

    /// Replaces the progress with a raw percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] when `policy` rejects
    /// out-of-range input.
    pub fn set_progress(
        &mut self,
        raw: i64,
        policy: TaskPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.progress = policy.resolve_progress(raw)?;
        self.touch(clock);
        Ok(())
    }

    /// Adds a tag. Returns `false` when the tag was already present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTag`] if the label is blank.
    pub fn add_tag(&mut self, label: &str, clock: &impl Clock) -> Result<bool, TaskDomainError> {
        let added = self.tags.insert(label)?;
        if added {
            self.touch(clock);
        }
        Ok(added)
    }

    /// Removes a tag. Returns `false` when the tag was absent.
    pub fn remove_tag(&mut self, label: &str, clock: &impl Clock) -> bool {
        let removed = self.tags.remove(label);
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims a required text field, returning `error` when nothing is left.
fn required_text(value: &str, error: TaskDomainError) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}
