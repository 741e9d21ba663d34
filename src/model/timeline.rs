use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{EffectiveStatus, Task};
use crate::error::ParseViewModeError;

/// Controls how the timeline is partitioned into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Daily,
    Weekly,
    Monthly,
    Full,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Daily,
        ViewMode::Weekly,
        ViewMode::Monthly,
        ViewMode::Full,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Daily => "daily",
            ViewMode::Weekly => "weekly",
            ViewMode::Monthly => "monthly",
            ViewMode::Full => "full",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "days" => Ok(ViewMode::Daily),
            "weekly" | "week" | "weeks" => Ok(ViewMode::Weekly),
            "monthly" | "month" | "months" => Ok(ViewMode::Monthly),
            "full" | "all" => Ok(ViewMode::Full),
            other => Err(ParseViewModeError(other.to_string())),
        }
    }
}

/// One column of the rendered grid. `start` and `end` are both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineUnit {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub year: i32,
    /// 1–4, quarter of `start`.
    pub quarter: u32,
    /// True for quarter columns.
    pub is_aggregate: bool,
}

impl TimelineUnit {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Horizontal placement of a bar, in percent of the timeline width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskPosition {
    pub left: f64,
    pub width: f64,
    pub visible: bool,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
}

impl TaskPosition {
    pub fn hidden() -> Self {
        Self {
            left: 0.0,
            width: 0.0,
            visible: false,
            actual_start: None,
            actual_end: None,
        }
    }

    /// CSS-ready `(left, width)` strings, e.g. `("30.0000%", "16.6667%")`.
    pub fn css(&self) -> (String, String) {
        (
            format!("{:.4}%", self.left),
            format!("{:.4}%", self.width),
        )
    }
}

/// Where the "today" line sits, in the same coordinate space as bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TodayMarker {
    pub position: f64,
    pub visible: bool,
}

/// A task plus everything the renderer needs to draw its row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedTask {
    #[serde(flatten)]
    pub task: Task,
    pub task_key: String,
    pub is_overdue: bool,
    pub days_until_deadline: Option<i64>,
    pub effective_status: Option<EffectiveStatus>,
    pub position: TaskPosition,
}

/// Output of one engine pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttLayout {
    pub today: NaiveDate,
    pub view_mode: ViewMode,
    pub units: Vec<TimelineUnit>,
    pub tasks: Vec<EnhancedTask>,
    pub today_marker: TodayMarker,
}

impl GanttLayout {
    pub fn timeline_start(&self) -> Option<NaiveDate> {
        self.units.first().map(|u| u.start)
    }

    pub fn timeline_end(&self) -> Option<NaiveDate> {
        self.units.last().map(|u| u.end)
    }

    pub fn task_by_key(&self, key: &str) -> Option<&EnhancedTask> {
        self.tasks.iter().find(|t| t.task_key == key)
    }

    /// Tasks in key order (`A`, `B`, ..., `Z`, `AA`).
    pub fn tasks_by_key(&self) -> Vec<&EnhancedTask> {
        let mut rows: Vec<&EnhancedTask> = self.tasks.iter().collect();
        rows.sort_by(|a, b| (a.task_key.len(), &a.task_key).cmp(&(b.task_key.len(), &b.task_key)));
        rows
    }
}
