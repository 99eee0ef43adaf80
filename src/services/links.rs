//! Cross-issue linking.
//!
//! Linking is advisory: a failed comment never aborts the pipeline. Failures
//! are collected into a [`LinkSummary`] instead of being swallowed, so
//! callers and tests can observe them without side-channel logs.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::domain::models::{Issue, LinkStats};
use crate::domain::ports::ProjectTracker;

/// How two issues relate across tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relation {
    /// The parent blocks the child. The default.
    #[default]
    Blocks,
    /// Informational cross-reference.
    RelatesTo,
    /// The child duplicates the parent.
    Duplicates,
}

impl Relation {
    /// Comment body posted on the child issue.
    pub fn phrase(&self, parent_number: u64) -> String {
        match self {
            Self::Blocks => format!("Blocked by #{parent_number}"),
            Self::RelatesTo => format!("Related to #{parent_number}"),
            Self::Duplicates => format!("Duplicate of #{parent_number}"),
        }
    }
}

/// A link comment that could not be posted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to link #{parent} -> #{child}: {message}")]
pub struct LinkError {
    /// Number of the blocking issue.
    pub parent: u64,
    /// Number of the issue the comment was meant for.
    pub child: u64,
    /// Underlying tracker error.
    pub message: String,
}

/// Outcome of one tier-linking pass.
#[derive(Debug, Clone, Default)]
pub struct LinkSummary {
    /// Comments posted.
    pub linked: usize,
    /// Entities skipped: no resolvable dependency, or no number of their own.
    pub skipped: usize,
    /// Comments that failed. Advisory; never propagated.
    pub failures: Vec<LinkError>,
}

impl LinkSummary {
    /// Counts for reporting.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            linked: self.linked,
            skipped: self.skipped,
            failed: self.failures.len(),
        }
    }
}

/// Post a relation comment on the child issue.
pub async fn link_issues(
    tracker: &dyn ProjectTracker,
    org: &str,
    repo: &str,
    parent_number: u64,
    child_number: u64,
    relation: Relation,
) -> Result<(), LinkError> {
    tracker
        .comment_on_issue(org, repo, child_number, &relation.phrase(parent_number))
        .await
        .map_err(|err| LinkError {
            parent: parent_number,
            child: child_number,
            message: err.to_string(),
        })
}

/// Link each task to the first story it blocks.
///
/// For every task, the first dependency (in declared order) whose id
/// resolves in `story_numbers` receives a `Blocks` comment naming the task.
/// Tasks with no resolvable dependency, or without a number of their own,
/// are skipped.
pub async fn link_tasks_to_stories(
    tracker: &dyn ProjectTracker,
    org: &str,
    repo: &str,
    tasks: &[Issue],
    task_numbers: &HashMap<String, u64>,
    story_numbers: &HashMap<String, u64>,
) -> LinkSummary {
    link_tier(tracker, org, repo, tasks, task_numbers, story_numbers).await
}

/// Link each story to the first epic it blocks. Same rules as
/// [`link_tasks_to_stories`], one tier up.
pub async fn link_stories_to_epics(
    tracker: &dyn ProjectTracker,
    org: &str,
    repo: &str,
    stories: &[Issue],
    story_numbers: &HashMap<String, u64>,
    epic_numbers: &HashMap<String, u64>,
) -> LinkSummary {
    link_tier(tracker, org, repo, stories, story_numbers, epic_numbers).await
}

async fn link_tier(
    tracker: &dyn ProjectTracker,
    org: &str,
    repo: &str,
    dependents: &[Issue],
    dependent_numbers: &HashMap<String, u64>,
    target_numbers: &HashMap<String, u64>,
) -> LinkSummary {
    let mut summary = LinkSummary::default();

    for dependent in dependents {
        let Some(&parent) = dependent_numbers.get(&dependent.id) else {
            summary.skipped += 1;
            continue;
        };
        let target = dependent
            .dependencies
            .iter()
            .find_map(|dep| target_numbers.get(dep).copied());
        let Some(child) = target else {
            debug!(issue_id = %dependent.id, "no resolvable dependency, skipping link");
            summary.skipped += 1;
            continue;
        };

        match link_issues(tracker, org, repo, parent, child, Relation::Blocks).await {
            Ok(()) => summary.linked += 1,
            Err(err) => summary.failures.push(err),
        }
    }

    summary
}
