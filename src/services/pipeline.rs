//! The push pipeline.
//!
//! Orchestrates one run of pushing a plan into the remote tracker: label
//! provisioning, dedup filtering, team provisioning, tiered issue creation
//! through the batch engine, cross-tier linking, and roadmap and timebox
//! processing. Phases run strictly in order; no phase starts before the
//! previous one has fully settled.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    issue_key, prepare_issues, project_key, timebox_key, validate_issue, ChildEmbed, Collection,
    Issue, IssueKind, Plan, ProcessedRecord, Project, PushReport, PushedIssue, Roadmap, Team,
    TierReport, TimeBox,
};
use crate::domain::ports::{ProcessedStore, ProjectTracker, RemoteIndex};
use crate::services::batch::{process_issues_in_batches, BatchOptions};
use crate::services::{labels, links};

/// Pushes plans into the remote tracker.
///
/// Ports are injected as `Arc<dyn _>` trait objects; the pipeline owns no
/// I/O of its own. One instance is assumed per org/repo at a time — the
/// processed store is not locked.
pub struct PushPipeline {
    tracker: Arc<dyn ProjectTracker>,
    store: Arc<dyn ProcessedStore>,
    index: Arc<dyn RemoteIndex>,
    batch: BatchOptions,
}

impl PushPipeline {
    /// Create a pipeline with default batch pacing.
    pub fn new(
        tracker: Arc<dyn ProjectTracker>,
        store: Arc<dyn ProcessedStore>,
        index: Arc<dyn RemoteIndex>,
    ) -> Self {
        Self {
            tracker,
            store,
            index,
            batch: BatchOptions::default(),
        }
    }

    /// Override the batch pacing.
    #[must_use]
    pub fn with_batch_options(mut self, batch: BatchOptions) -> Self {
        self.batch = batch;
        self
    }

    /// Push a whole plan: labels, teams, all three issue tiers, links,
    /// roadmaps, and timeboxes.
    ///
    /// Tiers are strict barriers — every task creation settles before the
    /// first story creation, every story before the first epic — because
    /// each tier embeds the remote numbers of the tier below it.
    #[instrument(skip_all, fields(org = %org, repo = %repo))]
    pub async fn full_push(&self, org: &str, repo: &str, plan: &Plan) -> DomainResult<PushReport> {
        // Phase 1: labels, before any issue references them.
        labels::ensure_labels(
            self.tracker.as_ref(),
            org,
            repo,
            &plan.backlogs,
            &plan.timeboxes,
            &plan.roadmaps,
        )
        .await?;

        let project_name = plan.project.as_ref().map_or(repo, |p| p.name.as_str());

        // Phase 2: seed the dedup index. A new project has nothing to sync,
        // so a failure here only costs dedup coverage.
        if let Err(err) = self.index.sync_from_remote(org, project_name).await {
            warn!(error = %err, "remote sync failed, proceeding without dedup cache");
        }

        // Phase 3: drop everything the remote already has, by title.
        let mut tasks = self.index.filter_new_issues(&plan.tasks).await?;
        let mut stories = self.index.filter_new_issues(&plan.stories).await?;
        let mut epics = self.index.filter_new_issues(&plan.epics).await?;
        let timeboxes = self.index.filter_new_timeboxes(&plan.timeboxes).await?;
        info!(
            tasks = tasks.len(),
            stories = stories.len(),
            epics = epics.len(),
            timeboxes = timeboxes.len(),
            "collections after remote filtering"
        );

        // Phase 4: teams. Independent of project/issue state.
        let teams_provisioned = self.provision_teams(org, &plan.teams).await?;

        // Phase 5: normalize and validate every surviving issue.
        prepare_issues(&mut tasks, IssueKind::Task)?;
        prepare_issues(&mut stories, IssueKind::Feature)?;
        prepare_issues(&mut epics, IssueKind::Epic)?;

        // Issues recorded as processed in an earlier run are dropped even
        // when the remote filter missed them.
        let tasks = self.filter_unprocessed(org, repo, tasks).await?;
        let stories = self.filter_unprocessed(org, repo, stories).await?;
        let epics = self.filter_unprocessed(org, repo, epics).await?;

        // Phase 6: obtain or reuse the board.
        let project_id = self.obtain_project(org, project_name).await?;
        let mut report = PushReport::begin(&project_id);
        report.teams_provisioned = teams_provisioned;

        // Phase 7: tiered creation, bottom up.
        let task_results = if tasks.is_empty() {
            Vec::new()
        } else {
            info!(count = tasks.len(), "pushing tasks");
            process_issues_in_batches(&tasks, &self.batch, |issue| {
                self.push_issue(org, repo, &project_id, issue, ChildEmbed::None)
            })
            .await
        };
        let task_numbers = number_map(&task_results);

        let story_results = if stories.is_empty() {
            Vec::new()
        } else {
            info!(count = stories.len(), "pushing stories");
            let embed = ChildEmbed::Tasks {
                tasks: &tasks,
                results: &task_results,
            };
            process_issues_in_batches(&stories, &self.batch, |issue| {
                self.push_issue(org, repo, &project_id, issue, embed)
            })
            .await
        };
        let story_numbers = number_map(&story_results);

        let epic_results = if epics.is_empty() {
            Vec::new()
        } else {
            info!(count = epics.len(), "pushing epics");
            let embed = ChildEmbed::Stories {
                stories: &stories,
                results: &story_results,
            };
            process_issues_in_batches(&epics, &self.batch, |issue| {
                self.push_issue(org, repo, &project_id, issue, embed)
            })
            .await
        };
        let epic_numbers = number_map(&epic_results);

        // Phase 8: best-effort linking, bottom tier first.
        report.task_links = links::link_tasks_to_stories(
            self.tracker.as_ref(),
            org,
            repo,
            &tasks,
            &task_numbers,
            &story_numbers,
        )
        .await
        .stats();
        report.story_links = links::link_stories_to_epics(
            self.tracker.as_ref(),
            org,
            repo,
            &stories,
            &story_numbers,
            &epic_numbers,
        )
        .await
        .stats();

        // Phase 9: roadmaps; one failure does not stop its siblings.
        for roadmap in &plan.roadmaps {
            match self.process_roadmap(org, repo, roadmap).await {
                Ok(()) => report.roadmaps_processed += 1,
                Err(err) => {
                    warn!(roadmap = %roadmap.name, error = %err, "roadmap processing failed, continuing");
                    report.roadmaps_failed += 1;
                }
            }
        }

        // Phase 10: timeboxes that survived filtering; same isolation.
        for timebox in &timeboxes {
            match self
                .process_timebox(org, repo, timebox, &tasks, &task_results, &task_numbers)
                .await
            {
                Ok(true) => report.timeboxes_processed += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!(timebox = %timebox.name, error = %err, "timebox processing failed, continuing");
                    report.timeboxes_failed += 1;
                }
            }
        }

        report.tasks = TierReport::from_results(task_results, tasks.len());
        report.stories = TierReport::from_results(story_results, stories.len());
        report.epics = TierReport::from_results(epic_results, epics.len());
        info!(
            run_id = %report.run_id,
            pushed = report.total_pushed(),
            failed = report.total_failed(),
            "full push complete"
        );
        Ok(report)
    }

    /// Push a flat issue collection into one board, with no tiering, no
    /// embedding, and no linking.
    pub async fn push_project_with_issues(
        &self,
        org: &str,
        repo: &str,
        project: &Project,
        mut issues: Vec<Issue>,
    ) -> DomainResult<(String, Vec<PushedIssue>)> {
        prepare_issues(&mut issues, IssueKind::Task)?;
        let issues = self.filter_unprocessed(org, repo, issues).await?;
        let project_id = self.obtain_project(org, &project.name).await?;
        let results = process_issues_in_batches(&issues, &self.batch, |issue| {
            self.push_issue(org, repo, &project_id, issue, ChildEmbed::None)
        })
        .await;
        Ok((project_id, results))
    }

    /// Push one issue: validate, create, attach to the board, set fields
    /// best-effort, record in the store.
    ///
    /// Failures in validation, creation, or attachment are logged with
    /// issue context and propagated; the batch engine decides whether to
    /// isolate them. Field-set failures only warn.
    #[instrument(skip_all, fields(issue_id = %issue.id))]
    pub async fn push_issue(
        &self,
        org: &str,
        repo: &str,
        project_id: &str,
        issue: &Issue,
        embed: ChildEmbed<'_>,
    ) -> DomainResult<PushedIssue> {
        validate_issue(issue)?;
        let assignees = resolve_assignees(issue);

        let created = self
            .tracker
            .create_issue(org, repo, issue, &assignees, embed)
            .await
            .map_err(|err| {
                error!(title = %issue.title, error = %err, "issue creation failed");
                err
            })?;
        debug!(number = created.number, "issue created");

        let item_id = self
            .tracker
            .add_issue_to_project(project_id, &created.id)
            .await
            .map_err(|err| {
                error!(number = created.number, error = %err, "board attachment failed");
                err
            })?;

        // Field ids may not exist in every board configuration; never fail
        // the push over them.
        if let Some(type_name) = issue.type_name.as_deref() {
            self.set_item_field(project_id, &item_id, "Type", type_name)
                .await;
        }
        if let Some(backlog) = issue.backlog.as_deref() {
            self.set_item_field(project_id, &item_id, "Backlog", backlog)
                .await;
        }

        let record = ProcessedRecord::new(
            &created.id,
            &issue.title,
            issue_key(org, repo, &issue.id),
            org,
        )
        .with_number(created.number)
        .with_repo(repo);
        self.store.append(Collection::Issues, &record).await?;

        Ok(PushedIssue {
            source_id: issue.id.clone(),
            issue_id: created.id,
            number: created.number,
            project_item_id: Some(item_id),
        })
    }

    /// Reuse the recorded board id for this org/name, or create the board.
    async fn obtain_project(&self, org: &str, name: &str) -> DomainResult<String> {
        let key = project_key(org, name);
        if let Some(record) = self.store.find(Collection::Projects, &key).await? {
            debug!(project = name, project_id = %record.id, "reusing recorded project");
            return Ok(record.id);
        }
        info!(org, project = name, "creating project board");
        let project_id = self.tracker.create_project(org, name).await?;
        let record = ProcessedRecord::new(&project_id, name, &key, org);
        self.store.append(Collection::Projects, &record).await?;
        Ok(project_id)
    }

    async fn provision_teams(&self, org: &str, teams: &[Team]) -> DomainResult<usize> {
        let mut provisioned = 0;
        for team in teams {
            let key = team.dedup_key(org);
            if self.store.exists(Collection::Teams, &key).await? {
                debug!(team = %team.id, "team already provisioned, skipping");
                continue;
            }
            info!(org, team = %team.name, members = team.members.len(), "provisioning team");
            self.tracker
                .ensure_team(org, &team.name, &team.description)
                .await?;
            for member in &team.members {
                self.tracker.add_team_member(org, &team.name, member).await?;
            }
            let record = ProcessedRecord::new(&team.id, &team.name, &key, org);
            self.store.append(Collection::Teams, &record).await?;
            provisioned += 1;
        }
        Ok(provisioned)
    }

    async fn process_roadmap(&self, org: &str, repo: &str, roadmap: &Roadmap) -> DomainResult<()> {
        info!(roadmap = %roadmap.name, milestones = roadmap.milestones.len(), "processing roadmap");
        self.tracker.create_roadmap_labels(org, repo, roadmap).await?;
        self.tracker.create_roadmap(org, repo, roadmap).await?;
        Ok(())
    }

    /// Process one timebox. `Ok(false)` means it was already recorded and
    /// nothing was done.
    async fn process_timebox(
        &self,
        org: &str,
        repo: &str,
        timebox: &TimeBox,
        tasks: &[Issue],
        task_results: &[PushedIssue],
        task_numbers: &HashMap<String, u64>,
    ) -> DomainResult<bool> {
        let key = timebox_key(org, repo, &timebox.name);
        if self.store.exists(Collection::Timeboxes, &key).await? {
            debug!(timebox = %timebox.name, "timebox already processed, skipping");
            return Ok(false);
        }

        let related: Vec<Issue> = tasks
            .iter()
            .filter(|task| timebox.task_ids().any(|id| id == task.id))
            .cloned()
            .collect();
        info!(timebox = %timebox.name, related = related.len(), "creating sprint issue");

        let created = self
            .tracker
            .create_sprint_issue(org, repo, timebox, &related, task_results)
            .await?;
        let record = ProcessedRecord::new(&created.id, &timebox.name, &key, org)
            .with_number(created.number)
            .with_repo(repo);
        self.store.append(Collection::Timeboxes, &record).await?;

        let numbers: Vec<u64> = timebox
            .task_ids()
            .filter_map(|id| task_numbers.get(id).copied())
            .collect();
        if !numbers.is_empty() {
            self.tracker
                .add_sprint_labels(org, repo, &timebox.name, &numbers)
                .await?;
        }
        Ok(true)
    }

    async fn filter_unprocessed(
        &self,
        org: &str,
        repo: &str,
        issues: Vec<Issue>,
    ) -> DomainResult<Vec<Issue>> {
        let mut fresh = Vec::with_capacity(issues.len());
        for issue in issues {
            if self
                .store
                .exists(Collection::Issues, &issue_key(org, repo, &issue.id))
                .await?
            {
                debug!(issue_id = %issue.id, "already recorded as processed, skipping");
            } else {
                fresh.push(issue);
            }
        }
        Ok(fresh)
    }

    async fn set_item_field(&self, project_id: &str, item_id: &str, field: &str, value: &str) {
        match self.tracker.project_field_id(project_id, field).await {
            Ok(Some(field_id)) => {
                if let Err(err) = self
                    .tracker
                    .set_project_item_field(project_id, item_id, &field_id, value)
                    .await
                {
                    warn!(field, error = %err, "field set failed, continuing");
                }
            }
            Ok(None) => warn!(field, "board has no such field, skipping"),
            Err(err) => warn!(field, error = %err, "field lookup failed, continuing"),
        }
    }
}

/// Map domain ids to remote issue numbers.
fn number_map(results: &[PushedIssue]) -> HashMap<String, u64> {
    results
        .iter()
        .map(|result| (result.source_id.clone(), result.number))
        .collect()
}

/// Trim, drop blanks, and dedup the issue's assignees, keeping order.
fn resolve_assignees(issue: &Issue) -> Vec<String> {
    let mut seen = HashSet::new();
    issue
        .assignees
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_assignees_dedups_and_trims() {
        let issue = Issue {
            id: "t-1".to_string(),
            title: "Set up CI".to_string(),
            assignees: vec![
                " alice ".to_string(),
                String::new(),
                "bob".to_string(),
                "alice".to_string(),
            ],
            ..Issue::default()
        };
        assert_eq!(resolve_assignees(&issue), vec!["alice", "bob"]);
    }

    #[test]
    fn test_number_map_keys_by_source_id() {
        let results = vec![
            PushedIssue {
                source_id: "t-2".to_string(),
                issue_id: "node-2".to_string(),
                number: 11,
                project_item_id: None,
            },
            PushedIssue {
                source_id: "t-1".to_string(),
                issue_id: "node-1".to_string(),
                number: 10,
                project_item_id: None,
            },
        ];
        let map = number_map(&results);
        assert_eq!(map.get("t-1"), Some(&10));
        assert_eq!(map.get("t-2"), Some(&11));
    }
}
