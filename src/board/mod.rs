//! Read-only projections of the task store.
//!
//! Every view here is a pure function of a [`TaskSnapshot`]: projecting the
//! same snapshot twice yields identical output, and nothing is cached
//! between snapshots.

mod gantt;
mod kanban;
mod summary;

pub use gantt::{GanttBar, GanttConfig, GanttDay, GanttLayout, GanttTimeline};
pub use kanban::{KanbanBoard, KanbanColumn};
pub use summary::TaskSummary;

use crate::task::ports::TaskSnapshot;

/// Derives the board views from task snapshots.
///
/// # Examples
///
/// ```
/// use taskboard::board::{BoardProjector, GanttConfig};
/// use taskboard::task::ports::TaskSnapshot;
///
/// let projector = BoardProjector::new(GanttConfig::default());
/// let snapshot = TaskSnapshot::new(0, Vec::new());
///
/// assert_eq!(projector.kanban(&snapshot).total(), 0);
/// assert!(projector.gantt(&snapshot).is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardProjector {
    gantt: GanttConfig,
}

impl BoardProjector {
    /// Creates a projector using the given timeline padding.
    #[must_use]
    pub const fn new(gantt: GanttConfig) -> Self {
        Self { gantt }
    }

    /// Returns the timeline padding in use.
    #[must_use]
    pub const fn gantt_config(&self) -> GanttConfig {
        self.gantt
    }

    /// Partitions the snapshot into status columns.
    #[must_use]
    pub fn kanban(&self, snapshot: &TaskSnapshot) -> KanbanBoard {
        KanbanBoard::project(snapshot)
    }

    /// Lays the snapshot out on a timeline.
    #[must_use]
    pub fn gantt(&self, snapshot: &TaskSnapshot) -> GanttLayout {
        GanttLayout::project(snapshot, self.gantt)
    }

    /// Computes dashboard statistics for the snapshot.
    #[must_use]
    pub fn summary(&self, snapshot: &TaskSnapshot) -> TaskSummary {
        TaskSummary::project(snapshot)
    }
}

#[cfg(test)]
mod tests;
