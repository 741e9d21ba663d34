use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::{parse_optional, Task};
use crate::error::DateParseError;

/// A construction project. Its own dates bound what the editing forms accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn start(&self) -> Result<Option<NaiveDate>, DateParseError> {
        parse_optional("project.start_date", self.start_date.as_deref())
    }

    pub fn end(&self) -> Result<Option<NaiveDate>, DateParseError> {
        parse_optional("project.end_date", self.end_date.as_deref())
    }
}

/// Projects and tasks exactly as the persistence layer delivers them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Tasks belonging to `project_id`, in input order.
    pub fn tasks_for(&self, project_id: Uuid) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| t.project_id == Some(project_id))
    }
}
