//! Windowed batch engine for issue pushes.
//!
//! Partitions a tier's issues into fixed-size windows, pushes each window
//! concurrently, falls back to paced per-issue retries for whatever the
//! concurrent attempt lost, and inserts a pacing delay between windows to
//! stay under remote rate limits.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::models::{BatchSettings, Issue, PushedIssue};

/// Pacing knobs for [`process_issues_in_batches`].
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Issues attempted concurrently per window.
    pub batch_size: usize,
    /// Pause between successive windows (not after the last).
    pub batch_pause: Duration,
    /// Pause before each individual retry within a window.
    pub retry_pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(BatchSettings::default())
    }
}

impl From<BatchSettings> for BatchOptions {
    fn from(settings: BatchSettings) -> Self {
        Self {
            batch_size: settings.batch_size.max(1),
            batch_pause: Duration::from_millis(settings.batch_pause_ms),
            retry_pause: Duration::from_millis(settings.retry_pause_ms),
        }
    }
}

/// Push a tier of issues through `push`, window by window.
///
/// Each window is first attempted fully concurrently; issues that fail the
/// concurrent attempt are re-attempted one at a time, each preceded by
/// `retry_pause`. Per-issue successes from the concurrent attempt are kept,
/// so a retry never re-creates an issue the first attempt already pushed.
/// A failure after the retry is logged and the rest of the window, and all
/// later windows, still run.
///
/// Returns the results of the issues that succeeded. Output order matches
/// input order when every issue succeeds on its concurrent attempt; across
/// the fallback boundary order is not guaranteed, which is why
/// [`PushedIssue::source_id`] exists.
pub async fn process_issues_in_batches<'a, F, Fut>(
    issues: &'a [Issue],
    options: &BatchOptions,
    push: F,
) -> Vec<PushedIssue>
where
    F: Fn(&'a Issue) -> Fut,
    Fut: Future<Output = crate::domain::DomainResult<PushedIssue>>,
{
    let mut results = Vec::with_capacity(issues.len());

    for (window_index, window) in issues.chunks(options.batch_size).enumerate() {
        if window_index > 0 {
            debug!(
                pause_ms = options.batch_pause.as_millis() as u64,
                "pacing before next window"
            );
            tokio::time::sleep(options.batch_pause).await;
        }

        debug!(
            window = window_index,
            size = window.len(),
            "pushing window concurrently"
        );
        let attempts = futures::future::join_all(window.iter().map(&push)).await;

        let mut retry: Vec<&Issue> = Vec::new();
        for (issue, outcome) in window.iter().zip(attempts) {
            match outcome {
                Ok(pushed) => results.push(pushed),
                Err(err) => {
                    warn!(
                        issue_id = %issue.id,
                        title = %issue.title,
                        error = %err,
                        "concurrent push failed, will retry individually"
                    );
                    retry.push(issue);
                }
            }
        }

        for issue in retry {
            tokio::time::sleep(options.retry_pause).await;
            match push(issue).await {
                Ok(pushed) => {
                    debug!(issue_id = %issue.id, number = pushed.number, "retry succeeded");
                    results.push(pushed);
                }
                Err(err) => {
                    warn!(
                        issue_id = %issue.id,
                        title = %issue.title,
                        error = %err,
                        "push failed after individual retry, skipping issue"
                    );
                }
            }
        }
    }

    info!(
        succeeded = results.len(),
        total = issues.len(),
        "batch push complete"
    );
    results
}
