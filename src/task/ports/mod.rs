//! Port contracts for the task store.
//!
//! Ports define storage-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskSnapshot};
