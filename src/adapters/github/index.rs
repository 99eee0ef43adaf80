//! [`RemoteIndex`] implementation backed by the repository's issue list.
//!
//! `sync_from_remote` caches every existing issue title; the filter methods
//! then dedupe by exact title match. An unsynced (or failed-sync) index has
//! an empty cache and filters nothing out.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, TimeBox};
use crate::domain::ports::RemoteIndex;

use super::client::GitHubClient;

/// Title cache over one GitHub repository.
#[derive(Debug)]
pub struct GitHubIndex {
    client: Arc<GitHubClient>,
    /// Repository the titles are read from.
    repo: String,
    titles: RwLock<HashSet<String>>,
}

impl GitHubIndex {
    /// Create an index over `repo`, initially empty.
    pub fn new(client: Arc<GitHubClient>, repo: impl Into<String>) -> Self {
        Self {
            client,
            repo: repo.into(),
            titles: RwLock::new(HashSet::new()),
        }
    }

    /// Title the sprint issue for a timebox carries remotely.
    fn sprint_title(timebox: &TimeBox) -> String {
        format!("Sprint: {}", timebox.name)
    }
}

#[async_trait]
impl RemoteIndex for GitHubIndex {
    async fn sync_from_remote(&self, org: &str, project_name: &str) -> DomainResult<()> {
        let issues = self.client.list_issues(org, &self.repo).await?;
        let mut titles = self.titles.write().await;
        titles.clear();
        for issue in issues {
            // The list endpoint returns PRs too; those never collide with
            // plan titles intentionally, so keep issues only.
            if issue.pull_request.is_none() {
                titles.insert(issue.title);
            }
        }
        info!(
            org,
            project = project_name,
            cached = titles.len(),
            "remote title cache primed"
        );
        Ok(())
    }

    async fn filter_new_issues(&self, issues: &[Issue]) -> DomainResult<Vec<Issue>> {
        let titles = self.titles.read().await;
        Ok(issues
            .iter()
            .filter(|issue| !titles.contains(&issue.title))
            .cloned()
            .collect())
    }

    async fn filter_new_timeboxes(&self, timeboxes: &[TimeBox]) -> DomainResult<Vec<TimeBox>> {
        let titles = self.titles.read().await;
        Ok(timeboxes
            .iter()
            .filter(|timebox| !titles.contains(&Self::sprint_title(timebox)))
            .cloned()
            .collect())
    }
}
