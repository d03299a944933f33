//! Task store for the project dashboard.
//!
//! This module owns the authoritative task collection: creating tasks,
//! merging field updates, moving tasks between statuses, and deleting them,
//! with every mutation handed back to readers as an immutable snapshot. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
