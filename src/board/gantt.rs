//! Gantt timeline layout of a task snapshot.
//!
//! The timeline runs from a lead-in before the earliest start date to a
//! trail-out after the latest due date. Every bar is placed by whole-day
//! offsets into that range, and a bar covers both its start and due dates.

use crate::task::{
    domain::{Progress, Task, TaskId, TaskStatus},
    ports::TaskSnapshot,
};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Padding applied around the scheduled date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttConfig {
    /// Days shown before the earliest start date.
    pub lead_in_days: u32,
    /// Days shown after the latest due date.
    pub trail_out_days: u32,
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            lead_in_days: 7,
            trail_out_days: 14,
        }
    }
}

/// One day column of the timeline header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttDay {
    date: NaiveDate,
    label: String,
    is_weekend: bool,
}

impl GanttDay {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            label: date.format("%b %-d").to_string(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the short header label, e.g. `Jun 1`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether the day falls on a Saturday or Sunday.
    #[must_use]
    pub const fn is_weekend(&self) -> bool {
        self.is_weekend
    }
}

/// Horizontal bar for one scheduled task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttBar {
    task_id: TaskId,
    title: String,
    status: TaskStatus,
    progress: Progress,
    start_date: NaiveDate,
    due_date: NaiveDate,
    offset_days: u32,
    duration_days: u32,
}

impl GanttBar {
    fn place(task: &Task, start_date: NaiveDate, due_date: NaiveDate, origin: NaiveDate) -> Self {
        let offset = (start_date - origin).num_days().max(0);
        let duration = (due_date - start_date)
            .num_days()
            .saturating_add(1)
            .max(1);
        Self {
            task_id: task.id(),
            title: task.title().to_owned(),
            status: task.status(),
            progress: task.progress(),
            start_date,
            due_date,
            offset_days: day_count(offset),
            duration_days: day_count(duration),
        }
    }

    /// Returns the task the bar represents.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the task start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the task due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the first day column the bar covers.
    #[must_use]
    pub const fn offset_days(&self) -> u32 {
        self.offset_days
    }

    /// Returns the number of day columns the bar covers, at least one.
    #[must_use]
    pub const fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Returns the exclusive end of the bar's `[offset, end)` span.
    #[must_use]
    pub const fn end_offset(&self) -> u32 {
        self.offset_days.saturating_add(self.duration_days)
    }
}

/// Timeline with a day header and one bar per scheduled task.
///
/// Header columns are generated on demand, so a timeline spanning the whole
/// calendar costs no more to build than a one-week one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttTimeline {
    min_start: NaiveDate,
    max_end: NaiveDate,
    span_days: u32,
    bars: Vec<GanttBar>,
}

impl GanttTimeline {
    /// Returns the first date on the timeline.
    #[must_use]
    pub const fn min_start(&self) -> NaiveDate {
        self.min_start
    }

    /// Returns the last date on the timeline.
    #[must_use]
    pub const fn max_end(&self) -> NaiveDate {
        self.max_end
    }

    /// Returns the number of days between the first and last date.
    #[must_use]
    pub const fn span_days(&self) -> u32 {
        self.span_days
    }

    /// Yields the header columns, one per date from start to end inclusive.
    pub fn days(&self) -> impl Iterator<Item = GanttDay> + use<> {
        let max_end = self.max_end;
        self.min_start
            .iter_days()
            .take_while(move |date| *date <= max_end)
            .map(GanttDay::new)
    }

    /// Returns the bars in store order.
    #[must_use]
    pub fn bars(&self) -> &[GanttBar] {
        &self.bars
    }

    /// Returns the bar for `task_id`, if the task is scheduled.
    #[must_use]
    pub fn bar(&self, task_id: TaskId) -> Option<&GanttBar> {
        self.bars.iter().find(|bar| bar.task_id == task_id)
    }
}

/// Result of laying out a snapshot on a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GanttLayout {
    /// No task has both a start and a due date.
    NoData,
    /// At least one task is scheduled.
    Timeline(GanttTimeline),
}

impl GanttLayout {
    /// Lays out every task that has both a start and a due date.
    #[must_use]
    pub fn project(snapshot: &TaskSnapshot, config: GanttConfig) -> Self {
        let scheduled: Vec<(&Task, NaiveDate, NaiveDate)> = snapshot
            .iter()
            .filter_map(|task| task.schedule().map(|(start, due)| (task, start, due)))
            .collect();

        let earliest = scheduled.iter().map(|(_, start, _)| *start).min();
        let latest = scheduled.iter().map(|(_, _, due)| *due).max();
        let (Some(earliest_start), Some(latest_due)) = (earliest, latest) else {
            debug!(revision = snapshot.revision(), "no scheduled tasks to lay out");
            return Self::NoData;
        };

        let min_start = earliest_start
            .checked_sub_days(Days::new(u64::from(config.lead_in_days)))
            .unwrap_or(NaiveDate::MIN);
        let max_end = latest_due
            .checked_add_days(Days::new(u64::from(config.trail_out_days)))
            .unwrap_or(NaiveDate::MAX);
        let span_days = day_count((max_end - min_start).num_days());

        let bars: Vec<GanttBar> = scheduled
            .into_iter()
            .map(|(task, start, due)| GanttBar::place(task, start, due, min_start))
            .collect();

        debug!(
            revision = snapshot.revision(),
            bars = bars.len(),
            span_days,
            "gantt layout projected"
        );
        Self::Timeline(GanttTimeline {
            min_start,
            max_end,
            span_days,
            bars,
        })
    }

    /// Returns the timeline, or `None` when there is nothing scheduled.
    #[must_use]
    pub const fn timeline(&self) -> Option<&GanttTimeline> {
        match self {
            Self::NoData => None,
            Self::Timeline(timeline) => Some(timeline),
        }
    }

    /// Returns whether there is nothing to draw.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Converts a non-negative day count into a column index.
fn day_count(days: i64) -> u32 {
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
