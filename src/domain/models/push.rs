//! Results produced while pushing issues to the tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::issue::Issue;

/// An issue freshly created on the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Remote node id; what project item creation wants.
    pub id: String,
    /// Issue number within the repository.
    pub number: u64,
    /// Title as the tracker stored it.
    pub title: String,
}

/// Everything the pipeline records about one successfully pushed issue.
///
/// Carries the plan-side `source_id` so later phases can resolve
/// dependencies without relying on result ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushedIssue {
    /// Plan-side id of the issue this result belongs to.
    pub source_id: String,
    /// Remote node id.
    pub issue_id: String,
    /// Issue number within the repository.
    pub number: u64,
    /// Project item id, when board placement succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_item_id: Option<String>,
}

/// Child issues to embed in a parent's body as a checklist.
///
/// Only already-pushed children are listed; the results slice supplies
/// their numbers.
#[derive(Debug, Clone, Copy)]
pub enum ChildEmbed<'a> {
    /// No checklist.
    None,
    /// A story embeds its tasks.
    Tasks {
        /// Task definitions from the plan.
        tasks: &'a [Issue],
        /// Push results to resolve numbers from.
        results: &'a [PushedIssue],
    },
    /// An epic embeds its stories.
    Stories {
        /// Story definitions from the plan.
        stories: &'a [Issue],
        /// Push results to resolve numbers from.
        results: &'a [PushedIssue],
    },
}

impl ChildEmbed<'_> {
    /// Render the checklist section, or `None` when nothing is embedded.
    ///
    /// Children whose ids never made it into `results` are skipped; a
    /// partially pushed tier still produces a useful checklist.
    pub fn render(&self) -> Option<String> {
        let (heading, children, results) = match self {
            Self::None => return None,
            Self::Tasks { tasks, results } => ("Tasks", *tasks, *results),
            Self::Stories { stories, results } => ("Stories", *stories, *results),
        };
        let mut lines = Vec::new();
        for child in children {
            if let Some(pushed) = results.iter().find(|r| r.source_id == child.id) {
                lines.push(format!("- [ ] #{} {}", pushed.number, child.title));
            }
        }
        if lines.is_empty() {
            return None;
        }
        Some(format!("## {heading}\n\n{}", lines.join("\n")))
    }
}

/// Per-tier outcome of the batch engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierReport {
    /// Issues successfully created.
    pub pushed: usize,
    /// Issues that failed both the concurrent attempt and the retry.
    pub failed: usize,
    /// Results for the pushed issues.
    pub results: Vec<PushedIssue>,
}

impl TierReport {
    /// Build a report from the batch engine's results and the tier's input size.
    pub fn from_results(results: Vec<PushedIssue>, attempted: usize) -> Self {
        Self {
            pushed: results.len(),
            failed: attempted.saturating_sub(results.len()),
            results,
        }
    }
}

/// Aggregate counts for one cross-tier linking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Comments posted.
    pub linked: usize,
    /// Entities with no resolvable dependency or no number of their own.
    pub skipped: usize,
    /// Link attempts whose comment failed. Advisory only.
    pub failed: usize,
}

/// Everything one `full_push` run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushReport {
    /// Identifier of this run, for correlating logs.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// The board everything was attached to.
    pub project_id: String,
    /// Teams provisioned this run (already-recorded teams are not counted).
    pub teams_provisioned: usize,
    /// Bottom tier.
    pub tasks: TierReport,
    /// Middle tier.
    pub stories: TierReport,
    /// Top tier.
    pub epics: TierReport,
    /// tasks→stories linking outcome.
    pub task_links: LinkStats,
    /// stories→epics linking outcome.
    pub story_links: LinkStats,
    /// Roadmaps fully processed.
    pub roadmaps_processed: usize,
    /// Roadmaps whose processing failed; siblings still ran.
    pub roadmaps_failed: usize,
    /// Timeboxes fully processed.
    pub timeboxes_processed: usize,
    /// Timeboxes whose processing failed; siblings still ran.
    pub timeboxes_failed: usize,
}

impl PushReport {
    /// A report for a freshly started run against the given board.
    pub fn begin(project_id: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            project_id: project_id.into(),
            teams_provisioned: 0,
            tasks: TierReport::default(),
            stories: TierReport::default(),
            epics: TierReport::default(),
            task_links: LinkStats::default(),
            story_links: LinkStats::default(),
            roadmaps_processed: 0,
            roadmaps_failed: 0,
            timeboxes_processed: 0,
            timeboxes_failed: 0,
        }
    }

    /// Total issues created across the three tiers.
    pub fn total_pushed(&self) -> usize {
        self.tasks.pushed + self.stories.pushed + self.epics.pushed
    }

    /// Total issues that failed across the three tiers.
    pub fn total_failed(&self) -> usize {
        self.tasks.failed + self.stories.failed + self.epics.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, title: &str) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            ..Issue::default()
        }
    }

    fn pushed(source_id: &str, number: u64) -> PushedIssue {
        PushedIssue {
            source_id: source_id.to_string(),
            issue_id: format!("node-{number}"),
            number,
            project_item_id: None,
        }
    }

    #[test]
    fn test_render_tasks_checklist() {
        let tasks = vec![issue("t-1", "Wire the API"), issue("t-2", "Write docs")];
        let results = vec![pushed("t-1", 10), pushed("t-2", 11)];
        let embed = ChildEmbed::Tasks {
            tasks: &tasks,
            results: &results,
        };
        let body = embed.render().unwrap();
        assert!(body.starts_with("## Tasks"));
        assert!(body.contains("- [ ] #10 Wire the API"));
        assert!(body.contains("- [ ] #11 Write docs"));
    }

    #[test]
    fn test_render_skips_unpushed_children() {
        let tasks = vec![issue("t-1", "Wire the API"), issue("t-2", "Write docs")];
        let results = vec![pushed("t-2", 11)];
        let embed = ChildEmbed::Tasks {
            tasks: &tasks,
            results: &results,
        };
        let body = embed.render().unwrap();
        assert!(!body.contains("t-1"));
        assert!(body.contains("#11"));
    }

    #[test]
    fn test_tier_report_counts_failures() {
        let report = TierReport::from_results(vec![pushed("t-1", 10)], 3);
        assert_eq!(report.pushed, 1);
        assert_eq!(report.failed, 2);
    }

    #[test]
    fn test_push_report_totals() {
        let mut report = PushReport::begin("PVT_1");
        report.tasks = TierReport::from_results(vec![pushed("t-1", 10), pushed("t-2", 11)], 2);
        report.stories = TierReport::from_results(vec![pushed("s-1", 12)], 2);
        assert_eq!(report.total_pushed(), 3);
        assert_eq!(report.total_failed(), 1);
    }

    #[test]
    fn test_render_none_when_empty() {
        let embed = ChildEmbed::None;
        assert!(embed.render().is_none());
        let stories: Vec<Issue> = Vec::new();
        let results: Vec<PushedIssue> = Vec::new();
        let embed = ChildEmbed::Stories {
            stories: &stories,
            results: &results,
        };
        assert!(embed.render().is_none());
    }
}
