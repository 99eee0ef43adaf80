//! `drover labels`: provision the plan's label set and nothing else.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::adapters::github::GitHubTracker;
use crate::infrastructure::{load_plan, ConfigLoader};
use crate::services::labels::{derive_labels, ensure_labels};

/// Arguments for `drover labels`.
#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// Organization to push into (overrides config)
    #[arg(long)]
    pub org: Option<String>,

    /// Repository to push into (overrides config)
    #[arg(long)]
    pub repo: Option<String>,

    /// Plan file (.yaml, .yml, or .json)
    #[arg(long)]
    pub plan: PathBuf,
}

/// Ensure every label the plan references.
pub async fn execute(args: LabelsArgs, json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let (org, repo) = super::resolve_target(args.org, args.repo, &config)?;
    let plan = load_plan(&args.plan)?;

    let client = super::build_client(&config)?;
    let tracker = GitHubTracker::new(client);

    let labels = derive_labels(&plan.backlogs, &plan.timeboxes, &plan.roadmaps);
    ensure_labels(
        &tracker,
        &org,
        &repo,
        &plan.backlogs,
        &plan.timeboxes,
        &plan.roadmaps,
    )
    .await?;

    if json {
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "org": org,
                "repo": repo,
                "labels": names,
            }))?
        );
    } else {
        println!(
            "{} ensured {} label(s) on {}/{}",
            console::style("✓").green().bold(),
            labels.len(),
            org,
            repo
        );
        for label in &labels {
            println!("  {} (#{})", label.name, label.color);
        }
    }
    Ok(())
}
