//! Command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "drover")]
#[command(about = "Push a hierarchical plan into a GitHub project board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Push a plan: labels, teams, issues, links, roadmaps, sprints
    Push(commands::push::PushArgs),

    /// Provision labels only
    Labels(commands::labels::LabelsArgs),

    /// Validate a plan offline, without touching the remote
    Validate(commands::validate::ValidateArgs),
}

/// Render a top-level error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!(
            "{}",
            serde_json::json!({ "error": format!("{err:#}") })
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
