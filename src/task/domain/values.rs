//! Validated scalar and collection values carried by tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Completion percentage in the range 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Upper bound of the percentage range.
    pub const MAX: u8 = 100;

    /// Progress of a task that has not started.
    pub const NONE: Self = Self(0);

    /// Progress of a finished task.
    pub const COMPLETE: Self = Self(Self::MAX);

    /// Creates a progress value, clamping the input into 0-100.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        let bounded = raw.clamp(0, i64::from(Self::MAX));
        Self(u8::try_from(bounded).unwrap_or(Self::MAX))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Progress {
    type Error = TaskDomainError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .ok()
            .filter(|value| *value <= Self::MAX)
            .map(Self)
            .ok_or(TaskDomainError::ProgressOutOfRange(raw))
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Set of free-text tags, unique within a task.
///
/// Tags are trimmed on insertion and kept sorted, so two sets holding the
/// same labels compare equal regardless of insertion order. Deserialized
/// sets go through the same checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Builds a tag set from raw labels, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTag`] if any label is blank.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, TaskDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = Self::new();
        for label in labels {
            tags.insert(label.as_ref())?;
        }
        Ok(tags)
    }

    /// Adds a tag. Returns `false` when the tag was already present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTag`] if the label is blank.
    pub fn insert(&mut self, label: &str) -> Result<bool, TaskDomainError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTag);
        }
        Ok(self.0.insert(trimmed.to_owned()))
    }

    /// Removes a tag. Returns `false` when the tag was absent.
    pub fn remove(&mut self, label: &str) -> bool {
        self.0.remove(label.trim())
    }

    /// Returns whether the tag is present.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label.trim())
    }

    /// Iterates tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let labels = Vec::<String>::deserialize(deserializer)?;
        Self::from_labels(labels).map_err(serde::de::Error::custom)
    }
}
