//! GitHub adapters: tracker, dedup index, and the shared HTTP client.

pub mod client;
pub mod index;
pub mod models;
pub mod tracker;

pub use client::{Credentials, GitHubClient};
pub use index::GitHubIndex;
pub use tracker::GitHubTracker;
