use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_math::days_between;
use crate::model::{EffectiveStatus, EnhancedTask, TaskStatus};

/// Computed deadline attributes of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineState {
    pub is_overdue: bool,
    /// Days from today to the end date; `None` once completed or without an end date.
    pub days_until_deadline: Option<i64>,
    pub effective_status: Option<EffectiveStatus>,
}

impl DeadlineState {
    /// Short label for list views, `None` when the task has no deadline.
    pub fn describe(&self, status: Option<TaskStatus>) -> Option<String> {
        if status == Some(TaskStatus::Completed) {
            return Some("Completed".to_string());
        }
        let days = self.days_until_deadline?;
        Some(match days {
            d if self.is_overdue => plural(d.abs(), "overdue"),
            0 => "Due today".to_string(),
            d => plural(d, "left"),
        })
    }
}

impl From<&EnhancedTask> for DeadlineState {
    fn from(task: &EnhancedTask) -> Self {
        Self {
            is_overdue: task.is_overdue,
            days_until_deadline: task.days_until_deadline,
            effective_status: task.effective_status,
        }
    }
}

fn plural(days: i64, suffix: &str) -> String {
    if days == 1 {
        format!("1 day {suffix}")
    } else {
        format!("{days} days {suffix}")
    }
}

pub fn evaluate_deadline(
    end: Option<NaiveDate>,
    status: Option<TaskStatus>,
    today: NaiveDate,
) -> DeadlineState {
    let completed = status == Some(TaskStatus::Completed);
    let is_overdue = !completed && end.is_some_and(|end| end < today);
    let days_until_deadline = match end {
        Some(end) if !completed => Some(days_between(today, end)),
        _ => None,
    };
    let effective_status = if is_overdue {
        Some(EffectiveStatus::Delayed)
    } else {
        status.map(EffectiveStatus::from)
    };

    DeadlineState {
        is_overdue,
        days_until_deadline,
        effective_status,
    }
}
