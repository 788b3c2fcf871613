use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{LilError, Result};
use crate::responses::ViewerResponse;
use crate::types::Issue;

const API_ENDPOINT: &str = "https://api.linear.app/graphql";
const PAGE_SIZE: u32 = 100;
const MAX_PAGES: usize = 50;

const ASSIGNED_ISSUES_QUERY: &str = r#"
query GetAssignedIssues($first: Int, $after: String) {
    viewer {
        assignedIssues(
            first: $first
            after: $after
            filter: { state: { type: { nin: ["completed", "canceled"] } } }
        ) {
            nodes {
                id
                identifier
                title
                dueDate
                createdAt
                url
                state {
                    id
                    type
                }
                assignee {
                    id
                    name
                    displayName
                }
                project {
                    id
                    name
                    targetDate
                }
            }
            pageInfo {
                hasNextPage
                endCursor
            }
        }
    }
}
"#;

pub struct LinearClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl LinearClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, API_ENDPOINT)
    }

    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = GraphQLRequest { query, variables };

        // Linear expects the personal API key without a "Bearer" prefix.
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LilError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let gql_response: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = gql_response.errors {
            return Err(LilError::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        gql_response.data.ok_or(LilError::EmptyResponse)
    }

    /// Fetch every active issue assigned to the authenticated user.
    ///
    /// Paging stops with an error if the server hands back the cursor it was
    /// just given, or after `MAX_PAGES` requests.
    pub async fn assigned_issues(&self) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut after: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let variables = json!({ "first": PAGE_SIZE, "after": after });
            let response: ViewerResponse = self
                .query(ASSIGNED_ISSUES_QUERY, Some(variables))
                .await?;
            let page = response.viewer.assigned_issues;
            debug!(count = page.nodes.len(), "fetched page of assigned issues");
            issues.extend(page.nodes);

            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => {
                    if after.as_deref() == Some(cursor.as_str()) {
                        return Err(LilError::PaginationStalled { cursor });
                    }
                    after = Some(cursor);
                }
                _ => return Ok(issues),
            }
        }

        Err(LilError::TooManyPages { limit: MAX_PAGES })
    }
}
