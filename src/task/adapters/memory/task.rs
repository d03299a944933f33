//! In-memory task repository.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskSnapshot},
};

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    last_id: Option<TaskId>,
    revision: u64,
}

impl InMemoryTaskState {
    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn bump(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `tasks` in the given order.
    ///
    /// Identifier allocation resumes after the largest identifier present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when two tasks share an
    /// identifier.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> TaskRepositoryResult<Self> {
        let repository = Self::new();
        for task in tasks {
            repository.store(&task)?;
        }
        Ok(repository)
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn next_id(&self) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write()?;
        let next = match state.last_id {
            None => TaskId::first(),
            Some(last) => last.next().ok_or_else(|| {
                TaskRepositoryError::persistence(std::io::Error::other(
                    "task identifier space exhausted",
                ))
            })?,
        };
        state.last_id = Some(next);
        Ok(next)
    }

    fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.position(task.id()).is_some() {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        // Seeded or externally built tasks may carry ids never handed out.
        if state.last_id.is_none_or(|last| last < task.id()) {
            state.last_id = Some(task.id());
        }
        state.tasks.push(task.clone());
        state.bump();
        Ok(())
    }

    fn modify<E, F>(&self, id: TaskId, change: F) -> Result<Task, E>
    where
        E: From<TaskRepositoryError>,
        F: FnOnce(&mut Task) -> Result<bool, E>,
    {
        let mut state = self.write()?;
        let slot = state
            .tasks
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let mut candidate = slot.clone();
        if !change(&mut candidate)? {
            return Ok(candidate);
        }
        slot.clone_from(&candidate);
        state.bump();
        Ok(candidate)
    }

    fn remove(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let index = state.position(id).ok_or(TaskRepositoryError::NotFound(id))?;
        let removed = state.tasks.remove(index);
        state.bump();
        Ok(removed)
    }

    fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    fn snapshot(&self) -> TaskRepositoryResult<TaskSnapshot> {
        let state = self.read()?;
        Ok(TaskSnapshot::new(state.revision, state.tasks.clone()))
    }
}
