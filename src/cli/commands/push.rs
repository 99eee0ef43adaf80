//! `drover push`: run the full pipeline against a plan file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use comfy_table::{presets, Attribute, Cell, Table};

use crate::adapters::github::{GitHubIndex, GitHubTracker};
use crate::adapters::store::JsonlStore;
use crate::domain::models::{Project, PushReport};
use crate::infrastructure::{load_plan, ConfigLoader};
use crate::services::PushPipeline;

/// Arguments for `drover push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Organization to push into (overrides config)
    #[arg(long)]
    pub org: Option<String>,

    /// Repository to push into (overrides config)
    #[arg(long)]
    pub repo: Option<String>,

    /// Plan file (.yaml, .yml, or .json)
    #[arg(long)]
    pub plan: PathBuf,

    /// Project board name (overrides the plan's project)
    #[arg(long)]
    pub project: Option<String>,
}

/// Run the full push.
pub async fn execute(args: PushArgs, json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let (org, repo) = super::resolve_target(args.org, args.repo, &config)?;

    let mut plan = load_plan(&args.plan)?;
    if let Some(name) = args.project {
        plan.project = Some(Project { name });
    }

    let client = super::build_client(&config)?;
    let tracker = Arc::new(GitHubTracker::new(client.clone()));
    let store = Arc::new(JsonlStore::new(&config.store.path));
    let index = Arc::new(GitHubIndex::new(client, &repo));
    let pipeline =
        PushPipeline::new(tracker, store, index).with_batch_options(config.batch.into());

    let report = pipeline.full_push(&org, &repo, &plan).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&org, &repo, &report);
    }
    Ok(())
}

fn print_report(org: &str, repo: &str, report: &PushReport) {
    println!(
        "{} pushed {}/{} to {}",
        console::style("✓").green().bold(),
        org,
        repo,
        report.project_id
    );

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Tier").add_attribute(Attribute::Bold),
        Cell::new("Pushed").add_attribute(Attribute::Bold),
        Cell::new("Failed").add_attribute(Attribute::Bold),
    ]);
    for (tier, outcome) in [
        ("Tasks", &report.tasks),
        ("Stories", &report.stories),
        ("Epics", &report.epics),
    ] {
        table.add_row(vec![
            Cell::new(tier),
            Cell::new(outcome.pushed),
            Cell::new(outcome.failed),
        ]);
    }
    println!("{table}");

    println!(
        "  Links: {} task→story, {} story→epic ({} skipped, {} failed)",
        report.task_links.linked,
        report.story_links.linked,
        report.task_links.skipped + report.story_links.skipped,
        report.task_links.failed + report.story_links.failed,
    );
    println!(
        "  Teams: {}  Roadmaps: {} ({} failed)  Sprints: {} ({} failed)",
        report.teams_provisioned,
        report.roadmaps_processed,
        report.roadmaps_failed,
        report.timeboxes_processed,
        report.timeboxes_failed,
    );
    if report.total_failed() > 0 {
        println!(
            "{} {} issue(s) failed; re-run to retry them",
            console::style("!").yellow().bold(),
            report.total_failed()
        );
    }
}
