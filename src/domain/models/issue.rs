//! Issue domain model.
//!
//! Issues are the unit the pipeline pushes: epics, stories (features), and
//! tasks, distinguished by [`IssueKind`] and related through `dependencies`.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// The three issue tiers the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Top tier; embeds story backlinks at creation.
    Epic,
    /// Middle tier; "story" on input. Embeds task backlinks at creation.
    Feature,
    /// Bottom tier; created first, embeds nothing.
    Task,
}

impl IssueKind {
    /// Canonical type name as written to the remote tracker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Epic => "Epic",
            Self::Feature => "Feature",
            Self::Task => "Task",
        }
    }

    /// Case-insensitive parse. `"story"` is an alias for [`Self::Feature`].
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "epic" => Some(Self::Epic),
            "feature" | "story" => Some(Self::Feature),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

/// Normalize a raw type name to its canonical form.
///
/// Total on all inputs: recognized names map to "Epic" / "Feature" / "Task",
/// anything else (including the empty string) passes through unchanged.
pub fn normalize_type(raw: &str) -> String {
    IssueKind::from_str(raw).map_or_else(|| raw.to_string(), |kind| kind.as_str().to_string())
}

/// A single issue from the plan.
///
/// Immutable during a push except for `type_name`, which
/// [`prepare_issues`] normalizes in place before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Domain key; unique within a push run.
    pub id: String,
    /// Issue title.
    pub title: String,
    /// Raw type name on input; canonical after [`prepare_issues`].
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Free-form body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backlog label name, when the issue belongs to a backlog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backlog: Option<String>,
    /// Ordered references to other issues by domain id.
    #[serde(default, alias = "depends", skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Remote usernames to assign.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

impl Issue {
    /// Kind parsed from the type name, when recognized.
    pub fn kind(&self) -> Option<IssueKind> {
        self.type_name.as_deref().and_then(IssueKind::from_str)
    }
}

/// Check that an issue carries the fields every remote write needs.
///
/// Total: returns `Err(DomainError::InvalidIssue)` instead of panicking.
/// The error message embeds the serialized issue for diagnostics.
pub fn validate_issue(issue: &Issue) -> DomainResult<()> {
    if issue.id.trim().is_empty() || issue.title.trim().is_empty() {
        let serialized = serde_json::to_string(issue).unwrap_or_else(|_| format!("{issue:?}"));
        return Err(DomainError::InvalidIssue(format!(
            "issue must have an id and a title: {serialized}"
        )));
    }
    Ok(())
}

/// Normalize then validate every issue in a collection, in place.
///
/// Issues without a type take the collection's default kind. Must run before
/// any issue in the collection is submitted remotely.
pub fn prepare_issues(issues: &mut [Issue], default: IssueKind) -> DomainResult<()> {
    for issue in issues.iter_mut() {
        let raw = issue
            .type_name
            .take()
            .unwrap_or_else(|| default.as_str().to_string());
        issue.type_name = Some(normalize_type(&raw));
        validate_issue(issue)?;
    }
    Ok(())
}
