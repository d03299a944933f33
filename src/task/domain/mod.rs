//! Domain model for the task store.
//!
//! Tasks carry a closed status enumeration, validated progress and tag
//! values, and an explicit policy describing which invariants the store
//! enforces. Nothing in this module performs I/O.

mod error;
mod ids;
mod policy;
mod status;
mod task;
mod values;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use policy::{DateOrderPolicy, ProgressPolicy, TaskPolicy, TransitionPolicy};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
pub use values::{Progress, TagSet};
