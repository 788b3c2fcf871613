use serde::Deserialize;

use crate::dates;
use crate::grouping::{self, ProjectBucket};
use crate::types::Issue;

pub const NO_ISSUES_TEXT: &str = "No active assigned issues";
pub const LOADING_TEXT: &str = "Loading issues...";
pub const QUIT_TEXT: &str = "Quit Lil";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Header(String),
    Separator,
    Leaf(MenuLeaf),
}

/// A clickable (or, without an action, disabled) menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLeaf {
    pub title: String,
    pub tooltip: String,
    pub action: Option<MenuAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Open(IssueLink),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLink {
    pub issue_id: String,
    pub identifier: String,
    pub url: String,
}

/// Tooltip used when an issue has no project, due date, assignee or state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipFallback {
    #[default]
    Title,
    Empty,
}

impl MenuNode {
    pub fn disabled(title: impl Into<String>) -> Self {
        Self::Leaf(MenuLeaf {
            title: title.into(),
            tooltip: String::new(),
            action: None,
        })
    }

    pub fn quit() -> Self {
        Self::Leaf(MenuLeaf {
            title: QUIT_TEXT.to_string(),
            tooltip: String::new(),
            action: Some(MenuAction::Quit),
        })
    }

    #[cfg_attr(target_os = "macos", allow(dead_code))]
    pub fn action(&self) -> Option<&MenuAction> {
        match self {
            Self::Leaf(leaf) => leaf.action.as_ref(),
            _ => None,
        }
    }
}

pub fn tooltip_lines(issue: &Issue) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(project) = issue.project() {
        lines.push(format!("Project: {}", project.name));
    }

    if let Some(due) = dates::format_due(issue.due_date()) {
        lines.push(format!("Due: {due}"));
    }

    if let Some(assignee) = issue.assignee() {
        lines.push(format!("Assignee: {}", assignee.label()));
    }

    if let Some(state) = issue.state() {
        lines.push(format!("Status: {}", state.state_type));
    }

    lines
}

pub fn tooltip(issue: &Issue, fallback: TooltipFallback) -> String {
    let lines = tooltip_lines(issue);
    if !lines.is_empty() {
        return lines.join("\n");
    }
    match fallback {
        TooltipFallback::Title => issue.title.clone(),
        TooltipFallback::Empty => String::new(),
    }
}

fn issue_leaf(issue: &Issue, fallback: TooltipFallback) -> MenuNode {
    MenuNode::Leaf(MenuLeaf {
        title: format!("{}: {}", issue.identifier, issue.title),
        tooltip: tooltip(issue, fallback),
        action: Some(MenuAction::Open(IssueLink {
            issue_id: issue.id.clone(),
            identifier: issue.identifier.clone(),
            url: issue.url.clone(),
        })),
    })
}

pub fn project(buckets: &[ProjectBucket<'_>], fallback: TooltipFallback) -> Vec<MenuNode> {
    if buckets.iter().all(|b| b.issues.is_empty()) {
        return vec![MenuNode::disabled(NO_ISSUES_TEXT)];
    }

    let mut nodes = Vec::new();
    for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
            nodes.push(MenuNode::Separator);
        }
        if let Some(name) = bucket.key.name() {
            nodes.push(MenuNode::Header(name.to_string()));
        }
        nodes.extend(bucket.issues.iter().map(|issue| issue_leaf(issue, fallback)));
    }
    nodes
}

/// Full pipeline from a fetched issue list to menu nodes.
pub fn render_issues(issues: &[Issue], fallback: TooltipFallback) -> Vec<MenuNode> {
    project(&grouping::arrange(issues), fallback)
}
