//! Repository port for task storage and snapshotting.

use crate::task::domain::{Task, TaskId};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task storage contract.
///
/// Implementations keep tasks in insertion order and bump a revision counter
/// on every successful mutation. Every call completes before returning, and
/// mutating calls are serialized against each other.
pub trait TaskRepository: Send + Sync {
    /// Reserves the next unused task identifier.
    ///
    /// Identifiers are never reused, even after the task holding one has
    /// been removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the identifier space
    /// is exhausted or the backing store fails.
    fn next_id(&self) -> TaskRepositoryResult<TaskId>;

    /// Appends a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier is
    /// already in use.
    fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Changes a stored task in place while holding exclusive access.
    ///
    /// `change` runs against a copy of the task. The copy replaces the stored
    /// task, keeping its position and bumping the revision, only when
    /// `change` returns `Ok(true)`. The resulting task is returned either
    /// way, and no other command can observe or change the task in between.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (converted into `E`) when
    /// the task does not exist, or the error from `change`, in which case
    /// the store is left unchanged.
    fn modify<E, F>(&self, id: TaskId, change: F) -> Result<Task, E>
    where
        E: From<TaskRepositoryError>,
        F: FnOnce(&mut Task) -> Result<bool, E>;

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist;
    /// the collection is left unchanged.
    fn remove(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns an immutable copy of the whole collection.
    fn snapshot(&self) -> TaskRepositoryResult<TaskSnapshot>;
}

/// Immutable point-in-time view of the task collection.
///
/// Cloning a snapshot is cheap; the task list is shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSnapshot {
    revision: u64,
    tasks: Arc<[Task]>,
}

impl TaskSnapshot {
    /// Creates a snapshot of `tasks` at `revision`.
    #[must_use]
    pub fn new(revision: u64, tasks: Vec<Task>) -> Self {
        Self {
            revision,
            tasks: tasks.into(),
        }
    }

    /// Returns the store revision the snapshot was taken at.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the snapshot holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates tasks in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}

impl<'a> IntoIterator for &'a TaskSnapshot {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
