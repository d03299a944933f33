//! Service layer applying shell commands to the task store.

use crate::task::{
    domain::{
        ParseTaskStatusError, TagSet, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch,
        TaskPolicy, TaskPriority, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskSnapshot},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    assignee: String,
    due_date: Option<NaiveDate>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    start_date: Option<NaiveDate>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required text fields.
    ///
    /// A due date must also be supplied with
    /// [`with_due_date`](Self::with_due_date) before the request is accepted.
    #[must_use]
    pub fn new(title: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assignee: assignee.into(),
            due_date: None,
            description: None,
            priority: None,
            start_date: None,
            tags: Vec::new(),
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the start date. Defaults to today when omitted.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let due_date = self.due_date.ok_or(TaskDomainError::MissingDueDate)?;
        let mut draft = TaskDraft::new(self.title, self.assignee, due_date)?
            .with_tags(TagSet::from_labels(&self.tags)?);
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(priority) = self.priority {
            draft = draft.with_priority(priority);
        }
        if let Some(start_date) = self.start_date {
            draft = draft.with_start_date(start_date);
        }
        Ok(draft)
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    patch: TaskPatch,
}

impl UpdateTaskRequest {
    /// Creates an update request.
    #[must_use]
    pub const fn new(task_id: TaskId, patch: TaskPatch) -> Self {
        Self { task_id, patch }
    }
}

/// Request payload for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request from status text such as `"completed"`.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
        }
    }
}

/// Coarse classification of lifecycle failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorKind {
    /// The command referenced a task that does not exist.
    NotFound,
    /// A field was missing or malformed, or a policy rejected the change.
    InvalidInput,
    /// The backing store failed.
    Persistence,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The requested status text is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
}

impl TaskLifecycleError {
    /// Returns the error classification the shell reports to the user.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Repository(TaskRepositoryError::NotFound(_)) => TaskErrorKind::NotFound,
            Self::Repository(TaskRepositoryError::Persistence(_)) => TaskErrorKind::Persistence,
            Self::Repository(TaskRepositoryError::DuplicateTask(_))
            | Self::Domain(_)
            | Self::InvalidStatus(_) => TaskErrorKind::InvalidInput,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Each command validates its input in full before the repository is
/// touched, so a rejected command leaves the store unchanged.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service enforcing the default, permissive policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            policy: TaskPolicy::default(),
        }
    }

    /// Replaces the invariant policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: TaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the invariant policy in force.
    #[must_use]
    pub const fn policy(&self) -> TaskPolicy {
        self.policy
    }

    /// Creates a pending task with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title, assignee or due
    /// date is missing, a tag is blank, or the dates violate the policy.
    pub fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let result = self.create_inner(request);
        result.inspect_err(|err| warn!(error = %err, "task creation rejected"))
    }

    fn create_inner(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let requested = request.into_draft()?;
        // Resolve the default start once so the checked and stored dates agree.
        let start_date = requested
            .start_date()
            .unwrap_or_else(|| self.clock.utc().date_naive());
        let draft = requested.with_start_date(start_date);
        self.policy
            .check_dates(Some(start_date), Some(draft.due_date()))?;

        let id = self.repository.next_id()?;
        let task = Task::create(id, draft, &*self.clock);
        self.repository.store(&task)?;
        info!(task_id = %task.id(), title = task.title(), "task created");
        Ok(task)
    }

    /// Merges the supplied fields into an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist, or
    /// [`TaskLifecycleError::Domain`] when a field is invalid.
    pub fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let task_id = request.task_id;
        self.modify(task_id, |task, policy, clock| {
            task.apply(request.patch, policy, clock).map(|()| true)
        })
        .inspect(|task| info!(task_id = %task.id(), "task updated"))
        .inspect_err(|err| warn!(task_id = %task_id, error = %err, "task update rejected"))
    }

    /// Moves a task to a new status.
    ///
    /// Moving a task to the status it already has succeeds without changing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown status text,
    /// [`TaskLifecycleError::Repository`] when the task does not exist, or
    /// [`TaskLifecycleError::Domain`] when the policy forbids the move.
    pub fn transition(&self, request: TransitionTaskRequest) -> TaskLifecycleResult<Task> {
        let task_id = request.task_id;
        let result = TaskStatus::try_from(request.target_status.as_str())
            .map_err(TaskLifecycleError::from)
            .and_then(|target| self.transition_to(task_id, target));
        result.inspect_err(|err| warn!(task_id = %task_id, error = %err, "transition rejected"))
    }

    fn transition_to(&self, task_id: TaskId, target: TaskStatus) -> TaskLifecycleResult<Task> {
        let mut from = target;
        let task = self.modify(task_id, |task, policy, clock| {
            from = task.status();
            task.transition_to(target, policy, clock)
        })?;
        if from == target {
            debug!(task_id = %task_id, status = %target, "task already has target status");
        } else {
            info!(task_id = %task_id, from = %from, to = %target, "task transitioned");
        }
        Ok(task)
    }

    /// Replaces a task's progress percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist, or [`TaskLifecycleError::Domain`] when the policy rejects the
    /// value.
    pub fn set_progress(&self, task_id: TaskId, progress: i64) -> TaskLifecycleResult<Task> {
        self.modify(task_id, |task, policy, clock| {
            task.set_progress(progress, policy, clock).map(|()| true)
        })
        .inspect(|task| {
            info!(
                task_id = %task_id,
                progress = task.progress().value(),
                "task progress set"
            );
        })
        .inspect_err(|err| warn!(task_id = %task_id, error = %err, "progress change rejected"))
    }

    /// Adds a tag to a task. Adding a tag the task already has is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist, or [`TaskLifecycleError::Domain`] when the tag is blank.
    pub fn add_tag(&self, task_id: TaskId, tag: &str) -> TaskLifecycleResult<Task> {
        self.modify(task_id, |task, _, clock| task.add_tag(tag, clock))
            .inspect(|_| debug!(task_id = %task_id, tag, "tag added"))
    }

    /// Removes a tag from a task. Removing an absent tag is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist.
    pub fn remove_tag(&self, task_id: TaskId, tag: &str) -> TaskLifecycleResult<Task> {
        self.modify(task_id, |task, _, clock| Ok(task.remove_tag(tag, clock)))
            .inspect(|_| debug!(task_id = %task_id, tag, "tag removed"))
    }

    /// Deletes a task and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist; the
    /// store is left unchanged.
    pub fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .remove(task_id)
            .map_err(TaskLifecycleError::from)
            .inspect(|_| info!(task_id = %task_id, "task deleted"))
            .inspect_err(|err| warn!(task_id = %task_id, error = %err, "task deletion rejected"))
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id)?)
    }

    /// Returns an immutable snapshot of every task in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store cannot be
    /// read.
    pub fn snapshot(&self) -> TaskLifecycleResult<TaskSnapshot> {
        Ok(self.repository.snapshot()?)
    }

    /// Applies `change` to a stored task under the repository's exclusive
    /// access. `change` returns whether the task was altered.
    fn modify<F>(&self, task_id: TaskId, change: F) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, TaskPolicy, &C) -> Result<bool, TaskDomainError>,
    {
        let policy = self.policy;
        let clock = &*self.clock;
        self.repository.modify(task_id, |task| {
            change(task, policy, clock).map_err(TaskLifecycleError::from)
        })
    }
}
