use serde::{Deserialize, Serialize};

use super::{Project, User};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub url: String,
    #[serde(default)]
    pub state: Option<WorkflowState>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub project: Option<Project>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowState {
    pub id: String,
    #[serde(rename = "type")]
    pub state_type: String,
}

// The API may hand back placeholder objects with an empty id; those count as
// absent everywhere below.
impl Issue {
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref().filter(|p| !p.id.is_empty())
    }

    pub fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref().filter(|u| !u.id.is_empty())
    }

    pub fn state(&self) -> Option<&WorkflowState> {
        self.state.as_ref().filter(|s| !s.id.is_empty())
    }

    pub fn due_date(&self) -> &str {
        self.due_date.as_deref().unwrap_or_default()
    }
}
