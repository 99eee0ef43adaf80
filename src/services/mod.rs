//! Service layer: the push pipeline and its supporting pieces.

pub mod batch;
pub mod labels;
pub mod links;
pub mod pipeline;

pub use batch::{process_issues_in_batches, BatchOptions};
pub use labels::ensure_labels;
pub use links::{
    link_issues, link_stories_to_epics, link_tasks_to_stories, LinkError, LinkSummary, Relation,
};
pub use pipeline::PushPipeline;
