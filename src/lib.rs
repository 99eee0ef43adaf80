//! Drover - plan-to-tracker push pipeline
//!
//! Drover pushes a hierarchical project-management model (epics, stories,
//! tasks, sprints, roadmaps, teams) into a GitHub repository and ProjectsV2
//! board, in rate-limit-friendly batches with append-only dedup bookkeeping.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and the port traits
//! - **Service Layer** (`services`): the push pipeline, batch engine,
//!   label derivation, and cross-issue linking
//! - **Adapters** (`adapters`): GitHub tracker/index and the JSONL store
//! - **Infrastructure** (`infrastructure`): configuration and plan loading
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use drover::services::PushPipeline;
//!
//! async fn push(pipeline: &PushPipeline, plan: &drover::domain::models::Plan) -> anyhow::Result<()> {
//!     let report = pipeline.full_push("acme", "atlas", plan).await?;
//!     println!("pushed {} issue(s)", report.total_pushed());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::github::{Credentials, GitHubClient, GitHubIndex, GitHubTracker};
pub use adapters::store::JsonlStore;
pub use domain::models::{
    Backlog, Collection, Config, Issue, IssueKind, Plan, ProcessedRecord, Project, PushReport,
    PushedIssue, Roadmap, Team, TimeBox,
};
pub use domain::ports::{LabelSpec, ProcessedStore, ProjectTracker, RemoteIndex};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::{ConfigError, ConfigLoader};
pub use services::{BatchOptions, PushPipeline};
