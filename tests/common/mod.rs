//! Common test utilities for integration tests
//!
//! In-memory implementations of the three ports, with scriptable failures,
//! plus fixture helpers shared across test files.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use drover::domain::models::{
    ChildEmbed, Collection, CreatedIssue, Issue, ProcessedRecord, PushedIssue, Roadmap, TimeBox,
};
use drover::domain::ports::{LabelSpec, ProcessedStore, ProjectTracker, RemoteIndex};
use drover::domain::{DomainError, DomainResult};
use drover::services::BatchOptions;

/// One recorded remote write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    CreateProject { name: String },
    AddToProject { issue_id: String },
    CreateIssue { title: String, kind: Option<String> },
    FieldLookup { name: String },
    SetField { field_id: String, value: String },
    EnsureLabel { name: String, color: String },
    EnsureTeam { name: String },
    AddMember { team: String, member: String },
    SprintIssue { name: String },
    SprintLabels { name: String, numbers: Vec<u64> },
    RoadmapLabels { name: String },
    Roadmap { name: String },
    Comment { number: u64, body: String },
}

/// Scriptable in-memory tracker.
#[derive(Default)]
pub struct MockTracker {
    calls: Mutex<Vec<TrackerCall>>,
    next_number: Mutex<u64>,
    /// Remaining failure counts per issue title.
    fail_create: Mutex<HashMap<String, usize>>,
    /// When set, every comment fails.
    fail_comments: Mutex<bool>,
    /// Roadmap names whose label creation fails.
    fail_roadmap_labels: Mutex<HashSet<String>>,
    /// When set, field lookups find nothing.
    missing_fields: Mutex<bool>,
    /// When set, field sets fail.
    fail_field_sets: Mutex<bool>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make creation of the issue with this title fail `times` times before
    /// succeeding.
    pub async fn fail_create(&self, title: &str, times: usize) {
        self.fail_create
            .lock()
            .await
            .insert(title.to_string(), times);
    }

    pub async fn fail_comments(&self) {
        *self.fail_comments.lock().await = true;
    }

    pub async fn fail_roadmap_labels(&self, roadmap: &str) {
        self.fail_roadmap_labels
            .lock()
            .await
            .insert(roadmap.to_string());
    }

    pub async fn with_missing_fields(&self) {
        *self.missing_fields.lock().await = true;
    }

    pub async fn with_failing_field_sets(&self) {
        *self.fail_field_sets.lock().await = true;
    }

    /// Snapshot of every recorded call, in order.
    pub async fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().await.clone()
    }

    /// Number of `create_issue` calls so far.
    pub async fn create_issue_count(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| matches!(call, TrackerCall::CreateIssue { .. }))
            .count()
    }

    /// Kinds of created issues, in creation order.
    pub async fn created_kinds(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                TrackerCall::CreateIssue { kind, .. } => kind.clone(),
                _ => None,
            })
            .collect()
    }

    /// Names of ensured labels, in order.
    pub async fn ensured_labels(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                TrackerCall::EnsureLabel { name, color } => Some((name.clone(), color.clone())),
                _ => None,
            })
            .collect()
    }

    /// Comment calls, in order.
    pub async fn comments(&self) -> Vec<(u64, String)> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                TrackerCall::Comment { number, body } => Some((*number, body.clone())),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: TrackerCall) {
        self.calls.lock().await.push(call);
    }

    async fn issue_number(&self) -> u64 {
        let mut next = self.next_number.lock().await;
        *next += 1;
        *next
    }
}

#[async_trait]
impl ProjectTracker for MockTracker {
    async fn create_project(&self, _org: &str, name: &str) -> DomainResult<String> {
        self.record(TrackerCall::CreateProject {
            name: name.to_string(),
        })
        .await;
        Ok(format!("PVT_{name}"))
    }

    async fn add_issue_to_project(
        &self,
        _project_id: &str,
        issue_id: &str,
    ) -> DomainResult<String> {
        self.record(TrackerCall::AddToProject {
            issue_id: issue_id.to_string(),
        })
        .await;
        Ok(format!("item-{issue_id}"))
    }

    async fn create_issue(
        &self,
        _org: &str,
        _repo: &str,
        issue: &Issue,
        _assignees: &[String],
        _embed: ChildEmbed<'_>,
    ) -> DomainResult<CreatedIssue> {
        {
            let mut failures = self.fail_create.lock().await;
            if let Some(remaining) = failures.get_mut(&issue.title) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(DomainError::RemoteWrite(format!(
                        "scripted failure for '{}'",
                        issue.title
                    )));
                }
            }
        }
        self.record(TrackerCall::CreateIssue {
            title: issue.title.clone(),
            kind: issue.type_name.clone(),
        })
        .await;
        let number = self.issue_number().await;
        Ok(CreatedIssue {
            id: format!("node-{number}"),
            number,
            title: issue.title.clone(),
        })
    }

    async fn project_field_id(
        &self,
        _project_id: &str,
        name: &str,
    ) -> DomainResult<Option<String>> {
        self.record(TrackerCall::FieldLookup {
            name: name.to_string(),
        })
        .await;
        if *self.missing_fields.lock().await {
            return Ok(None);
        }
        Ok(Some(format!("F-{name}")))
    }

    async fn set_project_item_field(
        &self,
        _project_id: &str,
        _item_id: &str,
        field_id: &str,
        value: &str,
    ) -> DomainResult<()> {
        if *self.fail_field_sets.lock().await {
            return Err(DomainError::RemoteWrite("field set refused".to_string()));
        }
        self.record(TrackerCall::SetField {
            field_id: field_id.to_string(),
            value: value.to_string(),
        })
        .await;
        Ok(())
    }

    async fn ensure_label(&self, _org: &str, _repo: &str, label: &LabelSpec) -> DomainResult<()> {
        self.record(TrackerCall::EnsureLabel {
            name: label.name.clone(),
            color: label.color.clone(),
        })
        .await;
        Ok(())
    }

    async fn ensure_team(&self, _org: &str, name: &str, _description: &str) -> DomainResult<()> {
        self.record(TrackerCall::EnsureTeam {
            name: name.to_string(),
        })
        .await;
        Ok(())
    }

    async fn add_team_member(&self, _org: &str, team: &str, member: &str) -> DomainResult<()> {
        self.record(TrackerCall::AddMember {
            team: team.to_string(),
            member: member.to_string(),
        })
        .await;
        Ok(())
    }

    async fn create_sprint_issue(
        &self,
        _org: &str,
        _repo: &str,
        timebox: &TimeBox,
        _related_tasks: &[Issue],
        _task_results: &[PushedIssue],
    ) -> DomainResult<CreatedIssue> {
        self.record(TrackerCall::SprintIssue {
            name: timebox.name.clone(),
        })
        .await;
        let number = self.issue_number().await;
        Ok(CreatedIssue {
            id: format!("node-{number}"),
            number,
            title: format!("Sprint: {}", timebox.name),
        })
    }

    async fn add_sprint_labels(
        &self,
        _org: &str,
        _repo: &str,
        sprint_name: &str,
        task_numbers: &[u64],
    ) -> DomainResult<()> {
        self.record(TrackerCall::SprintLabels {
            name: sprint_name.to_string(),
            numbers: task_numbers.to_vec(),
        })
        .await;
        Ok(())
    }

    async fn create_roadmap_labels(
        &self,
        _org: &str,
        _repo: &str,
        roadmap: &Roadmap,
    ) -> DomainResult<()> {
        if self.fail_roadmap_labels.lock().await.contains(&roadmap.name) {
            return Err(DomainError::RemoteWrite(format!(
                "scripted failure for roadmap '{}'",
                roadmap.name
            )));
        }
        self.record(TrackerCall::RoadmapLabels {
            name: roadmap.name.clone(),
        })
        .await;
        Ok(())
    }

    async fn create_roadmap(&self, _org: &str, _repo: &str, roadmap: &Roadmap) -> DomainResult<()> {
        self.record(TrackerCall::Roadmap {
            name: roadmap.name.clone(),
        })
        .await;
        Ok(())
    }

    async fn comment_on_issue(
        &self,
        _org: &str,
        _repo: &str,
        number: u64,
        body: &str,
    ) -> DomainResult<()> {
        if *self.fail_comments.lock().await {
            return Err(DomainError::RemoteWrite("comment refused".to_string()));
        }
        self.record(TrackerCall::Comment {
            number,
            body: body.to_string(),
        })
        .await;
        Ok(())
    }
}

/// In-memory processed store.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<(Collection, String), ProcessedRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.records
            .lock()
            .await
            .keys()
            .filter(|(c, _)| *c == collection)
            .count()
    }
}

#[async_trait]
impl ProcessedStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        unique_key: &str,
    ) -> DomainResult<Option<ProcessedRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .get(&(collection, unique_key.to_string()))
            .cloned())
    }

    async fn append(&self, collection: Collection, record: &ProcessedRecord) -> DomainResult<()> {
        self.records
            .lock()
            .await
            .insert((collection, record.unique_key.clone()), record.clone());
        Ok(())
    }
}

/// Index with a fixed set of known remote titles.
#[derive(Default)]
pub struct StaticIndex {
    known_titles: HashSet<String>,
    fail_sync: bool,
}

impl StaticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            known_titles: titles.iter().map(|t| (*t).to_string()).collect(),
            fail_sync: false,
        }
    }

    pub fn failing_sync() -> Self {
        Self {
            known_titles: HashSet::new(),
            fail_sync: true,
        }
    }
}

#[async_trait]
impl RemoteIndex for StaticIndex {
    async fn sync_from_remote(&self, _org: &str, _project_name: &str) -> DomainResult<()> {
        if self.fail_sync {
            return Err(DomainError::Sync("remote unreachable".to_string()));
        }
        Ok(())
    }

    async fn filter_new_issues(&self, issues: &[Issue]) -> DomainResult<Vec<Issue>> {
        Ok(issues
            .iter()
            .filter(|issue| !self.known_titles.contains(&issue.title))
            .cloned()
            .collect())
    }

    async fn filter_new_timeboxes(&self, timeboxes: &[TimeBox]) -> DomainResult<Vec<TimeBox>> {
        Ok(timeboxes
            .iter()
            .filter(|timebox| !self.known_titles.contains(&format!("Sprint: {}", timebox.name)))
            .cloned()
            .collect())
    }
}

/// A minimal issue fixture.
pub fn issue(id: &str, title: &str) -> Issue {
    Issue {
        id: id.to_string(),
        title: title.to_string(),
        ..Issue::default()
    }
}

/// An issue depending on other issues by domain id.
pub fn issue_with_deps(id: &str, title: &str, deps: &[&str]) -> Issue {
    Issue {
        dependencies: deps.iter().map(|d| (*d).to_string()).collect(),
        ..issue(id, title)
    }
}

/// Batch options without pacing delays, for fast tests.
pub fn fast_batch() -> BatchOptions {
    BatchOptions {
        batch_size: 3,
        batch_pause: std::time::Duration::ZERO,
        retry_pause: std::time::Duration::ZERO,
    }
}

/// Arc-wrapped mock set ready for pipeline construction.
pub fn mocks() -> (Arc<MockTracker>, Arc<MemoryStore>, Arc<StaticIndex>) {
    (
        Arc::new(MockTracker::new()),
        Arc::new(MemoryStore::new()),
        Arc::new(StaticIndex::new()),
    )
}
