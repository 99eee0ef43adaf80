//! `drover validate`: offline plan check, no remote access.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::models::{prepare_issues, IssueKind};
use crate::infrastructure::load_plan;

/// Arguments for `drover validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Plan file (.yaml, .yml, or .json)
    #[arg(long)]
    pub plan: PathBuf,
}

/// Normalize and validate every issue collection in the plan.
pub async fn execute(args: ValidateArgs, json: bool) -> Result<()> {
    let plan = load_plan(&args.plan)?;

    let tiers = [
        ("tasks", plan.tasks.clone(), IssueKind::Task),
        ("stories", plan.stories.clone(), IssueKind::Feature),
        ("epics", plan.epics.clone(), IssueKind::Epic),
    ];
    for (name, mut issues, kind) in tiers {
        prepare_issues(&mut issues, kind).with_context(|| format!("invalid issue in {name}"))?;
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "plan": args.plan.display().to_string(),
                "tasks": plan.tasks.len(),
                "stories": plan.stories.len(),
                "epics": plan.epics.len(),
                "teams": plan.teams.len(),
                "timeboxes": plan.timeboxes.len(),
                "roadmaps": plan.roadmaps.len(),
                "valid": true,
            }))?
        );
    } else {
        println!(
            "{} {} is valid: {} issue(s), {} team(s), {} sprint(s), {} roadmap(s)",
            console::style("✓").green().bold(),
            args.plan.display(),
            plan.issue_count(),
            plan.teams.len(),
            plan.timeboxes.len(),
            plan.roadmaps.len(),
        );
    }
    Ok(())
}
