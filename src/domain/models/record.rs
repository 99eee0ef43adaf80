//! Records the processed-state store keeps between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A store collection; each collection is persisted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Project boards already obtained.
    Projects,
    /// Issues already pushed.
    Issues,
    /// Teams already provisioned.
    Teams,
    /// Sprints already processed.
    Timeboxes,
}

impl Collection {
    /// Stable name; used as the store file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Issues => "issues",
            Self::Teams => "teams",
            Self::Timeboxes => "timeboxes",
        }
    }
}

/// One processed entity, as persisted for idempotence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Remote id of the created entity.
    pub id: String,
    /// Human-readable name or title.
    pub title: String,
    /// Issue number, for issue records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Dedup key; lookups match on this exactly.
    pub unique_key: String,
    /// Organization the entity was created under.
    pub org: String,
    /// Repository the entity was created under, when repo-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// When the entity was processed.
    pub processed_at: DateTime<Utc>,
}

impl ProcessedRecord {
    /// Construct a record keyed by `unique_key`, stamped with now.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        unique_key: impl Into<String>,
        org: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            number: None,
            unique_key: unique_key.into(),
            org: org.into(),
            repo: None,
            processed_at: Utc::now(),
        }
    }

    /// Attach an issue number.
    #[must_use]
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Attach a repository.
    #[must_use]
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }
}

/// Dedup key for a project board.
pub fn project_key(org: &str, name: &str) -> String {
    format!("{org}/{name}")
}

/// Dedup key for an issue.
pub fn issue_key(org: &str, repo: &str, source_id: &str) -> String {
    format!("{org}/{repo}/{source_id}")
}

/// Dedup key for a team.
pub fn team_key(org: &str, team_id: &str) -> String {
    format!("{org}/{team_id}")
}

/// Dedup key for a sprint.
pub fn timebox_key(org: &str, repo: &str, name: &str) -> String {
    format!("{org}/{repo}/sprint:{name}")
}
