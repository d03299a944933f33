//! Step definitions for task board behaviour scenarios.

pub mod given;
pub mod world;
