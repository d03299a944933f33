//! Runtime configuration for the task store and its projections.

use crate::{
    board::{BoardProjector, GanttConfig},
    task::domain::TaskPolicy,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Combined store policy and projection settings.
///
/// Every field is optional in serialized form and falls back to its
/// default.
///
/// # Examples
///
/// ```
/// use taskboard::config::BoardConfig;
/// use taskboard::task::domain::ProgressPolicy;
///
/// let config = BoardConfig::from_json_str(
///     r#"{ "policy": { "progress": "reject" }, "gantt": { "lead_in_days": 3 } }"#,
/// ).expect("valid configuration");
///
/// assert_eq!(config.policy.progress, ProgressPolicy::Reject);
/// assert_eq!(config.gantt.lead_in_days, 3);
/// assert_eq!(config.gantt.trail_out_days, 14);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Invariants enforced by the lifecycle service.
    pub policy: TaskPolicy,
    /// Gantt timeline padding.
    pub gantt: GanttConfig,
}

impl BoardConfig {
    /// Creates a configuration enforcing every store invariant.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            policy: TaskPolicy::strict(),
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed or names
    /// an unknown policy value.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Builds a projector using these settings.
    #[must_use]
    pub const fn projector(&self) -> BoardProjector {
        BoardProjector::new(self.gantt)
    }
}
