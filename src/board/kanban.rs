//! Kanban partition of a task snapshot.

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskSnapshot,
    services::TransitionTaskRequest,
};
use serde::Serialize;

/// One status column of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanColumn {
    status: TaskStatus,
    title: &'static str,
    tasks: Vec<Task>,
}

impl KanbanColumn {
    fn collect(status: TaskStatus, snapshot: &TaskSnapshot) -> Self {
        Self {
            status,
            title: status.label(),
            tasks: snapshot
                .iter()
                .filter(|task| task.status() == status)
                .cloned()
                .collect(),
        }
    }

    /// Returns the status this column holds.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the column's tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns whether the column holds the given task.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == task_id)
    }
}

/// Tasks grouped into the four status columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    revision: u64,
    columns: [KanbanColumn; 4],
}

impl KanbanBoard {
    /// Partitions `snapshot` by status, keeping store order within columns.
    #[must_use]
    pub fn project(snapshot: &TaskSnapshot) -> Self {
        Self {
            revision: snapshot.revision(),
            columns: TaskStatus::ALL.map(|status| KanbanColumn::collect(status, snapshot)),
        }
    }

    /// Returns the revision of the snapshot the board was built from.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the columns in board order.
    #[must_use]
    pub const fn columns(&self) -> &[KanbanColumn; 4] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub const fn column(&self, status: TaskStatus) -> &KanbanColumn {
        let [pending, in_progress, completed, blocked] = &self.columns;
        match status {
            TaskStatus::Pending => pending,
            TaskStatus::InProgress => in_progress,
            TaskStatus::Completed => completed,
            TaskStatus::Blocked => blocked,
        }
    }

    /// Returns the number of tasks across every column.
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns.iter().map(KanbanColumn::len).sum()
    }

    /// Returns the status column currently holding `task_id`.
    #[must_use]
    pub fn locate(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.columns
            .iter()
            .find(|column| column.contains(task_id))
            .map(KanbanColumn::status)
    }

    /// Translates dropping a card onto a column into a transition command.
    ///
    /// Returns `None` when the task is not on the board or is dropped back
    /// onto the column it came from.
    #[must_use]
    pub fn drop_request(
        &self,
        task_id: TaskId,
        target: TaskStatus,
    ) -> Option<TransitionTaskRequest> {
        self.locate(task_id)
            .filter(|current| *current != target)
            .map(|_| TransitionTaskRequest::new(task_id, target.as_str()))
    }
}
