//! GraphQL response shapes for the assigned-issues query.

use serde::Deserialize;

use crate::types::Issue;

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Debug)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// Viewer (current user) response.
#[derive(Deserialize, Debug)]
pub struct ViewerResponse {
    pub viewer: Viewer,
}

#[derive(Deserialize, Debug)]
pub struct Viewer {
    #[serde(rename = "assignedIssues")]
    pub assigned_issues: Connection<Issue>,
}
