//! GitHub API request and response models.
//!
//! These structs map to the REST v3 and GraphQL JSON payloads the adapter
//! exchanges. They are internal to the GitHub adapter and are not part of
//! the domain model.

use serde::{Deserialize, Serialize};

/// Request body for creating a new issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Labels to apply to the new issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Usernames to assign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

/// Response from the create-issue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueResponse {
    /// Opaque GraphQL node id; what board placement wants.
    pub node_id: String,
    /// Issue number within the repository.
    pub number: u64,
    /// Title as stored.
    pub title: String,
}

/// Request body for creating a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabelRequest {
    /// Label name.
    pub name: String,
    /// Hex color without the leading `#`.
    pub color: String,
    /// Label description.
    pub description: String,
}

/// Request body for posting a comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    /// Comment body, plain text or Markdown.
    pub body: String,
}

/// Request body for adding labels to an existing issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLabelsRequest {
    /// Label names to add.
    pub labels: Vec<String>,
}

/// Request body for creating a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMilestoneRequest {
    /// Milestone title.
    pub title: String,
    /// Milestone description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601 due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}

/// Request body for creating an organization team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    /// Team name.
    pub name: String,
    /// Team description.
    pub description: String,
    /// Team visibility, "closed" (visible to the org) by default.
    pub privacy: String,
}

/// One issue from the list endpoint, reduced to what the index needs.
///
/// The `/issues` endpoint also returns pull requests; those carry a
/// non-null `pull_request` field and are filtered out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Current state, "open" or "closed".
    pub state: String,
    /// Present when this item is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

/// Marker object present on pull requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// API URL of the pull request resource.
    pub url: String,
}

/// A GraphQL request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    /// The query or mutation document.
    pub query: String,
    /// Variables referenced by the document.
    pub variables: serde_json::Value,
}

/// A GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    /// The data tree, absent on total failure.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Errors, present when any part of the document failed.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_issue_request_omits_none_fields() {
        let req = CreateIssueRequest {
            title: "Minimal".to_string(),
            body: None,
            labels: None,
            assignees: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("\"body\""));
        assert!(!json.contains("\"labels\""));
        assert!(!json.contains("\"assignees\""));
    }

    #[test]
    fn test_create_issue_response_deserialization() {
        let json = r#"{ "node_id": "I_abc", "number": 7, "title": "Set up CI", "state": "open" }"#;
        let resp: CreateIssueResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.node_id, "I_abc");
        assert_eq!(resp.number, 7);
    }

    #[test]
    fn test_issue_summary_pr_detection() {
        let json = r#"{
            "number": 99,
            "title": "Add feature X",
            "state": "open",
            "pull_request": { "url": "https://api.github.com/repos/org/repo/pulls/99" }
        }"#;
        let summary: IssueSummary = serde_json::from_str(json).unwrap();
        assert!(summary.pull_request.is_some());
    }

    #[test]
    fn test_graphql_response_with_errors() {
        let json = r#"{ "errors": [{ "message": "Could not resolve org" }] }"#;
        let resp: GraphQlResponse = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.len(), 1);
        assert_eq!(resp.errors[0].message, "Could not resolve org");
    }
}
