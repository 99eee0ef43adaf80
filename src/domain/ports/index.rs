//! Remote dedup index port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, TimeBox};

/// Port for the by-title dedup filter seeded from remote state.
///
/// [`sync_from_remote`](RemoteIndex::sync_from_remote) primes a local cache
/// of what already exists; the filter methods then reduce a desired
/// collection to the subset not yet present. An unsynced index filters
/// nothing out — new projects have nothing to dedupe against.
#[async_trait]
pub trait RemoteIndex: Send + Sync {
    /// Pull existing remote state into the local cache.
    async fn sync_from_remote(&self, org: &str, project_name: &str) -> DomainResult<()>;

    /// Issues whose titles are not yet present remotely.
    async fn filter_new_issues(&self, issues: &[Issue]) -> DomainResult<Vec<Issue>>;

    /// Timeboxes whose sprint issues are not yet present remotely.
    async fn filter_new_timeboxes(&self, timeboxes: &[TimeBox]) -> DomainResult<Vec<TimeBox>>;
}
