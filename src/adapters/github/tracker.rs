//! [`ProjectTracker`] implementation over the GitHub client.
//!
//! REST covers issues, labels, comments, milestones, and teams; the
//! ProjectsV2 board only speaks GraphQL, so board operations go through
//! `/graphql` on the same rate-limited client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ChildEmbed, CreatedIssue, Issue, PushedIssue, Roadmap, TimeBox};
use crate::domain::ports::{LabelSpec, ProjectTracker};

use super::client::GitHubClient;

/// GitHub adapter for the remote tracker port.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    client: Arc<GitHubClient>,
}

impl GitHubTracker {
    /// Wrap a shared GitHub client.
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }

    /// Team slug as GitHub derives it from the name.
    fn team_slug(name: &str) -> String {
        name.trim().to_lowercase().replace(' ', "-")
    }

    /// Pull a string out of a GraphQL data tree by path.
    fn extract_str(data: &serde_json::Value, path: &[&str], op: &str) -> DomainResult<String> {
        let mut node = data;
        for key in path {
            node = &node[key];
        }
        node.as_str().map(str::to_string).ok_or_else(|| {
            DomainError::RemoteWrite(format!(
                "GitHub {op} response missing {}",
                path.join(".")
            ))
        })
    }
}

#[async_trait]
impl ProjectTracker for GitHubTracker {
    async fn create_project(&self, org: &str, name: &str) -> DomainResult<String> {
        // The createProjectV2 mutation wants the owner's node id, not the login.
        let owner = self
            .client
            .graphql(
                "query($login: String!) { organization(login: $login) { id } }",
                json!({ "login": org }),
            )
            .await?;
        let owner_id = Self::extract_str(&owner, &["organization", "id"], "create_project")?;

        let data = self
            .client
            .graphql(
                "mutation($ownerId: ID!, $title: String!) { \
                 createProjectV2(input: { ownerId: $ownerId, title: $title }) { \
                 projectV2 { id } } }",
                json!({ "ownerId": owner_id, "title": name }),
            )
            .await?;
        Self::extract_str(&data, &["createProjectV2", "projectV2", "id"], "create_project")
    }

    async fn add_issue_to_project(
        &self,
        project_id: &str,
        issue_id: &str,
    ) -> DomainResult<String> {
        let data = self
            .client
            .graphql(
                "mutation($projectId: ID!, $contentId: ID!) { \
                 addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) { \
                 item { id } } }",
                json!({ "projectId": project_id, "contentId": issue_id }),
            )
            .await?;
        Self::extract_str(&data, &["addProjectV2ItemById", "item", "id"], "add_issue_to_project")
    }

    async fn create_issue(
        &self,
        org: &str,
        repo: &str,
        issue: &Issue,
        assignees: &[String],
        embed: ChildEmbed<'_>,
    ) -> DomainResult<CreatedIssue> {
        let mut body = issue.description.clone().unwrap_or_default();
        if let Some(checklist) = embed.render() {
            if !body.is_empty() {
                body.push_str("\n\n");
            }
            body.push_str(&checklist);
        }

        let mut labels = Vec::new();
        if let Some(type_name) = issue.type_name.as_deref() {
            labels.push(type_name.to_string());
        }
        if let Some(backlog) = issue.backlog.as_deref() {
            labels.push(backlog.to_string());
        }

        let created = self
            .client
            .create_issue(
                org,
                repo,
                &issue.title,
                (!body.is_empty()).then_some(body.as_str()),
                labels,
                assignees.to_vec(),
            )
            .await?;
        Ok(CreatedIssue {
            id: created.node_id,
            number: created.number,
            title: created.title,
        })
    }

    async fn project_field_id(
        &self,
        project_id: &str,
        name: &str,
    ) -> DomainResult<Option<String>> {
        let data = self
            .client
            .graphql(
                "query($projectId: ID!) { node(id: $projectId) { \
                 ... on ProjectV2 { fields(first: 50) { nodes { \
                 ... on ProjectV2FieldCommon { id name } } } } } }",
                json!({ "projectId": project_id }),
            )
            .await?;

        let nodes = data["node"]["fields"]["nodes"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        Ok(nodes
            .iter()
            .find(|field| field["name"].as_str() == Some(name))
            .and_then(|field| field["id"].as_str())
            .map(str::to_string))
    }

    async fn set_project_item_field(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        value: &str,
    ) -> DomainResult<()> {
        self.client
            .graphql(
                "mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: String!) { \
                 updateProjectV2ItemFieldValue(input: { projectId: $projectId, itemId: $itemId, \
                 fieldId: $fieldId, value: { text: $value } }) { \
                 projectV2Item { id } } }",
                json!({
                    "projectId": project_id,
                    "itemId": item_id,
                    "fieldId": field_id,
                    "value": value,
                }),
            )
            .await?;
        Ok(())
    }

    async fn ensure_label(&self, org: &str, repo: &str, label: &LabelSpec) -> DomainResult<()> {
        self.client
            .ensure_label(org, repo, &label.name, &label.color, &label.description)
            .await
    }

    async fn ensure_team(&self, org: &str, name: &str, description: &str) -> DomainResult<()> {
        self.client.ensure_team(org, name, description).await
    }

    async fn add_team_member(&self, org: &str, team: &str, member: &str) -> DomainResult<()> {
        self.client
            .add_team_member(org, &Self::team_slug(team), member)
            .await
    }

    async fn create_sprint_issue(
        &self,
        org: &str,
        repo: &str,
        timebox: &TimeBox,
        related_tasks: &[Issue],
        task_results: &[PushedIssue],
    ) -> DomainResult<CreatedIssue> {
        let mut lines = vec![format!("Sprint status: {}", timebox.status), String::new()];
        for task in related_tasks {
            match task_results.iter().find(|r| r.source_id == task.id) {
                Some(pushed) => lines.push(format!("- [ ] #{} {}", pushed.number, task.title)),
                None => lines.push(format!("- [ ] {}", task.title)),
            }
        }
        let body = lines.join("\n");

        let labels = vec![
            format!("sprint: {}", timebox.name),
            format!("status: {}", timebox.status),
            "type: sprint".to_string(),
        ];
        let created = self
            .client
            .create_issue(
                org,
                repo,
                &format!("Sprint: {}", timebox.name),
                Some(&body),
                labels,
                Vec::new(),
            )
            .await?;
        Ok(CreatedIssue {
            id: created.node_id,
            number: created.number,
            title: created.title,
        })
    }

    async fn add_sprint_labels(
        &self,
        org: &str,
        repo: &str,
        sprint_name: &str,
        task_numbers: &[u64],
    ) -> DomainResult<()> {
        let label = format!("sprint: {sprint_name}");
        for &number in task_numbers {
            self.client
                .add_labels(org, repo, number, vec![label.clone()])
                .await?;
        }
        Ok(())
    }

    async fn create_roadmap_labels(
        &self,
        org: &str,
        repo: &str,
        roadmap: &Roadmap,
    ) -> DomainResult<()> {
        self.client
            .ensure_label(
                org,
                repo,
                &format!("roadmap: {}", roadmap.name),
                "D4C5F9",
                roadmap.description.as_deref().unwrap_or(""),
            )
            .await?;
        self.client
            .ensure_label(org, repo, "type: roadmap", "BFD4F2", "Roadmap issue")
            .await
    }

    async fn create_roadmap(&self, org: &str, repo: &str, roadmap: &Roadmap) -> DomainResult<()> {
        for milestone in &roadmap.milestones {
            self.client
                .create_milestone(
                    org,
                    repo,
                    &milestone.name,
                    milestone.description.as_deref(),
                    milestone.due_on.as_deref(),
                )
                .await?;
        }
        Ok(())
    }

    async fn comment_on_issue(
        &self,
        org: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> DomainResult<()> {
        self.client.post_comment(org, repo, number, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_slug() {
        assert_eq!(GitHubTracker::team_slug("Platform Team"), "platform-team");
        assert_eq!(GitHubTracker::team_slug(" QA "), "qa");
    }

    #[test]
    fn test_extract_str_reports_missing_path() {
        let data = json!({ "organization": {} });
        let err = GitHubTracker::extract_str(&data, &["organization", "id"], "create_project")
            .unwrap_err();
        assert!(err.to_string().contains("organization.id"));
    }
}
