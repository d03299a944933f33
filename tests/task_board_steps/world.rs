//! Shared world state for task board BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{BoardProjector, GanttConfig, GanttLayout, KanbanBoard},
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId},
        services::{TaskLifecycleError, TaskLifecycleService, TransitionTaskRequest},
    },
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub service: TestTaskService,
    pub projector: BoardProjector,
    pub task_ids: HashMap<String, TaskId>,
    pub last_drop_request: Option<Option<TransitionTaskRequest>>,
    pub last_command_result: Option<Result<Task, TaskLifecycleError>>,
    pub last_layout: Option<GanttLayout>,
}

impl TaskBoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            projector: BoardProjector::new(GanttConfig::default()),
            task_ids: HashMap::new(),
            last_drop_request: None,
            last_command_result: None,
            last_layout: None,
        }
    }

    /// Looks up the identifier of a task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with `title` was created.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }

    /// Projects the current store onto a Kanban board.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub fn kanban(&self) -> Result<KanbanBoard, eyre::Report> {
        let snapshot = self.service.snapshot()?;
        Ok(self.projector.kanban(&snapshot))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}
