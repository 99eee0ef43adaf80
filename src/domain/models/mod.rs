pub mod config;
pub mod issue;
pub mod plan;
pub mod push;
pub mod record;
pub mod roadmap;
pub mod team;
pub mod timebox;

pub use config::{BatchSettings, Config, GithubConfig, LoggingConfig, StoreConfig};
pub use issue::{normalize_type, prepare_issues, validate_issue, Issue, IssueKind};
pub use plan::{Backlog, Plan, Project};
pub use push::{ChildEmbed, CreatedIssue, LinkStats, PushReport, PushedIssue, TierReport};
pub use record::{
    issue_key, project_key, team_key, timebox_key, Collection, ProcessedRecord,
};
pub use roadmap::{Milestone, Roadmap};
pub use team::Team;
pub use timebox::{status_color, SprintItem, TimeBox};
