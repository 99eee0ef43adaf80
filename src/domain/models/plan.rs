//! The plan aggregate: everything one push run operates on.

use serde::{Deserialize, Serialize};

use super::issue::Issue;
use super::roadmap::Roadmap;
use super::team::Team;
use super::timebox::TimeBox;

/// A project board to create or reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Board name; also the project dedup key suffix.
    pub name: String,
}

/// A backlog; used only to derive a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlog {
    /// Label name.
    pub name: String,
    /// Label description.
    #[serde(default)]
    pub description: String,
}

/// A full planning model as loaded from a plan file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// The target project board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    /// Top-tier issues.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub epics: Vec<Issue>,
    /// Middle-tier issues.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<Issue>,
    /// Bottom-tier issues.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Issue>,
    /// Teams to provision before any issue is created.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
    /// Sprints to process after the issue tiers.
    #[serde(default, alias = "sprints", skip_serializing_if = "Vec::is_empty")]
    pub timeboxes: Vec<TimeBox>,
    /// Roadmaps to process after linking.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roadmaps: Vec<Roadmap>,
    /// Backlogs; only label sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backlogs: Vec<Backlog>,
}

impl Plan {
    /// Total number of issues across the three tiers.
    pub fn issue_count(&self) -> usize {
        self.epics.len() + self.stories.len() + self.tasks.len()
    }
}
