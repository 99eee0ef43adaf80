//! Roadmap domain model.
//!
//! Roadmaps are opaque to the pipeline beyond label and milestone creation;
//! the tracker adapter decides how milestones map onto the remote API.

use serde::{Deserialize, Serialize};

/// A roadmap: a named group of milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Roadmap name; doubles as the `roadmap: {name}` label suffix.
    pub name: String,
    /// Roadmap description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Milestones to create remotely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
}

/// One milestone on a roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone title.
    pub name: String,
    /// Milestone description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601 due date, passed through to the remote tracker.
    #[serde(default, alias = "dueOn", skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}
