use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::date_math;
use crate::error::DateParseError;

/// Stored workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Planning => "planning",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::OnHold => "on-hold",
            TaskStatus::Completed => "completed",
        }
    }

    /// Lenient mapping used for imported spreadsheets.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "planning" | "planned" | "not started" | "not-started" | "new" => {
                Some(TaskStatus::Planning)
            }
            "in-progress" | "in progress" | "in_progress" | "active" | "started" => {
                Some(TaskStatus::InProgress)
            }
            "on-hold" | "on hold" | "on_hold" | "paused" | "blocked" => Some(TaskStatus::OnHold),
            "completed" | "complete" | "done" | "finished" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Status as displayed, after the overdue override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectiveStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
    Delayed,
}

impl EffectiveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectiveStatus::Planning => "planning",
            EffectiveStatus::InProgress => "in-progress",
            EffectiveStatus::OnHold => "on-hold",
            EffectiveStatus::Completed => "completed",
            EffectiveStatus::Delayed => "delayed",
        }
    }
}

impl From<TaskStatus> for EffectiveStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Planning => EffectiveStatus::Planning,
            TaskStatus::InProgress => EffectiveStatus::InProgress,
            TaskStatus::OnHold => EffectiveStatus::OnHold,
            TaskStatus::Completed => EffectiveStatus::Completed,
        }
    }
}

/// A task record as handed over by the persistence layer.
///
/// Dates stay in their wire form (`YYYY-MM-DD`, possibly followed by a time
/// component) until the engine reads them with [`Task::start`] / [`Task::end`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

impl Task {
    /// Create an unscheduled task created now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start_date: None,
            end_date: None,
            status: None,
            created_at: Utc::now(),
            project_id: None,
        }
    }

    /// Set both schedule dates from calendar dates.
    pub fn scheduled(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start.format("%Y-%m-%d").to_string());
        self.end_date = Some(end.format("%Y-%m-%d").to_string());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn in_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn start(&self) -> Result<Option<NaiveDate>, DateParseError> {
        parse_optional("start_date", self.start_date.as_deref())
    }

    pub fn end(&self) -> Result<Option<NaiveDate>, DateParseError> {
        parse_optional("end_date", self.end_date.as_deref())
    }
}

/// Blank strings count as "no date", the way empty form fields arrive.
pub(crate) fn parse_optional(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, DateParseError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => date_math::parse_calendar_date(field, value).map(Some),
    }
}
