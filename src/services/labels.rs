//! Label provisioning.
//!
//! Issues reference labels at creation time, so the full label set — the
//! fixed tier labels plus everything derived from backlogs, timeboxes, and
//! roadmaps — is ensured before the first issue is created.

use tracing::{debug, info};

use crate::domain::errors::DomainResult;
use crate::domain::models::{status_color, Backlog, Roadmap, TimeBox};
use crate::domain::ports::{LabelSpec, ProjectTracker};

/// Tier label colors, fixed across projects.
const FEATURE_COLOR: &str = "A2EEEF";
const TASK_COLOR: &str = "7057FF";
const EPIC_COLOR: &str = "3E4B9E";

/// Color shared by the derived name labels (backlog / sprint / roadmap).
const DERIVED_COLOR: &str = "D4C5F9";

/// Color for the `type:` marker labels.
const MARKER_COLOR: &str = "BFD4F2";

/// The full label set a plan needs, in provisioning order.
pub fn derive_labels(
    backlogs: &[Backlog],
    timeboxes: &[TimeBox],
    roadmaps: &[Roadmap],
) -> Vec<LabelSpec> {
    let mut labels = vec![
        LabelSpec::new("Feature", FEATURE_COLOR, "User-facing story"),
        LabelSpec::new("Task", TASK_COLOR, "Implementation task"),
        LabelSpec::new("Epic", EPIC_COLOR, "Large body of work"),
    ];

    for backlog in backlogs {
        labels.push(LabelSpec::new(
            &backlog.name,
            DERIVED_COLOR,
            &backlog.description,
        ));
    }

    for timebox in timeboxes {
        labels.push(LabelSpec::new(
            format!("sprint: {}", timebox.name),
            DERIVED_COLOR,
            format!("Issues scheduled in sprint {}", timebox.name),
        ));
        labels.push(LabelSpec::new(
            format!("status: {}", timebox.status),
            status_color(&timebox.status),
            String::new(),
        ));
    }
    if !timeboxes.is_empty() {
        labels.push(LabelSpec::new("type: sprint", MARKER_COLOR, "Sprint issue"));
    }

    for roadmap in roadmaps {
        labels.push(LabelSpec::new(
            format!("roadmap: {}", roadmap.name),
            DERIVED_COLOR,
            roadmap.description.clone().unwrap_or_default(),
        ));
    }
    if !roadmaps.is_empty() {
        labels.push(LabelSpec::new(
            "type: roadmap",
            MARKER_COLOR,
            "Roadmap issue",
        ));
    }

    // Duplicate statuses across timeboxes are harmless remotely but noisy;
    // keep the first occurrence of each name.
    let mut seen = std::collections::HashSet::new();
    labels.retain(|label| seen.insert(label.name.clone()));
    labels
}

/// Ensure every label the plan references exists on the repository.
///
/// Public entry point; also phase 1 of `full_push`.
pub async fn ensure_labels(
    tracker: &dyn ProjectTracker,
    org: &str,
    repo: &str,
    backlogs: &[Backlog],
    timeboxes: &[TimeBox],
    roadmaps: &[Roadmap],
) -> DomainResult<()> {
    let labels = derive_labels(backlogs, timeboxes, roadmaps);
    info!(org, repo, count = labels.len(), "ensuring labels");
    for label in &labels {
        debug!(name = %label.name, color = %label.color, "ensuring label");
        tracker.ensure_label(org, repo, label).await?;
    }
    Ok(())
}
