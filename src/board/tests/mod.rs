//! Unit tests for board projections.
