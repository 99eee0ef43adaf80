//! Remote tracker port.
//!
//! One trait method per remote write operation the pipeline performs.
//! The GitHub adapter implements this over a rate-limited HTTP client;
//! tests implement it with an in-memory mock.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ChildEmbed, CreatedIssue, Issue, PushedIssue, Roadmap, TimeBox};

/// A label to provision on the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    /// Label name.
    pub name: String,
    /// Hex color without the leading `#`.
    pub color: String,
    /// Label description.
    pub description: String,
}

impl LabelSpec {
    /// Construct a label spec.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: description.into(),
        }
    }
}

/// Port for the remote issue tracker and its project board.
///
/// Every method is a single remote write (or lookup). Implementations map
/// errors to [`DomainError::RemoteWrite`](crate::domain::DomainError);
/// retry and failure-isolation policy live in the caller, not here.
#[async_trait]
pub trait ProjectTracker: Send + Sync {
    /// Create a project board under the organization; returns the board id.
    async fn create_project(&self, org: &str, name: &str) -> DomainResult<String>;

    /// Attach an already-created issue to a board; returns the item id.
    async fn add_issue_to_project(
        &self,
        project_id: &str,
        issue_id: &str,
    ) -> DomainResult<String>;

    /// Create an issue, embedding the given children as a body checklist.
    async fn create_issue(
        &self,
        org: &str,
        repo: &str,
        issue: &Issue,
        assignees: &[String],
        embed: ChildEmbed<'_>,
    ) -> DomainResult<CreatedIssue>;

    /// Look up a board custom field by name. `None` when the board has no
    /// field with that name; missing fields are not an error.
    async fn project_field_id(
        &self,
        project_id: &str,
        name: &str,
    ) -> DomainResult<Option<String>>;

    /// Set a custom field on a board item.
    async fn set_project_item_field(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        value: &str,
    ) -> DomainResult<()>;

    /// Create a label if it does not already exist. Idempotent.
    async fn ensure_label(&self, org: &str, repo: &str, label: &LabelSpec) -> DomainResult<()>;

    /// Create a team if it does not already exist. Idempotent.
    async fn ensure_team(&self, org: &str, name: &str, description: &str) -> DomainResult<()>;

    /// Add a member to a team.
    async fn add_team_member(&self, org: &str, team: &str, member: &str) -> DomainResult<()>;

    /// Create the umbrella issue for a sprint, listing its related tasks.
    async fn create_sprint_issue(
        &self,
        org: &str,
        repo: &str,
        timebox: &TimeBox,
        related_tasks: &[Issue],
        task_results: &[PushedIssue],
    ) -> DomainResult<CreatedIssue>;

    /// Apply the `sprint: {name}` label to the given task issues.
    async fn add_sprint_labels(
        &self,
        org: &str,
        repo: &str,
        sprint_name: &str,
        task_numbers: &[u64],
    ) -> DomainResult<()>;

    /// Provision the labels a roadmap's issues reference.
    async fn create_roadmap_labels(
        &self,
        org: &str,
        repo: &str,
        roadmap: &Roadmap,
    ) -> DomainResult<()>;

    /// Create a roadmap's milestones on the repository.
    async fn create_roadmap(&self, org: &str, repo: &str, roadmap: &Roadmap) -> DomainResult<()>;

    /// Post a comment on an issue. Used by cross-issue linking.
    async fn comment_on_issue(
        &self,
        org: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> DomainResult<()>;
}
