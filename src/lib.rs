//! Taskboard: task store and board projections for a project dashboard.
//!
//! This crate holds the authoritative task collection behind a dashboard and
//! derives the views the dashboard renders: a Kanban board, a Gantt
//! timeline, and headline statistics.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task records and the commands that change them
//! - [`board`]: Read-only projections of task snapshots
//! - [`config`]: Store policy and projection settings

pub mod board;
pub mod config;
pub mod task;

#[cfg(test)]
mod test_support;
