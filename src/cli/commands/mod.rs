//! CLI command implementations.

pub mod labels;
pub mod push;
pub mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::github::{Credentials, GitHubClient};
use crate::domain::models::Config;

/// Resolve an org/repo pair from flags, falling back to config.
pub(crate) fn resolve_target(
    org: Option<String>,
    repo: Option<String>,
    config: &Config,
) -> Result<(String, String)> {
    let org = org
        .or_else(|| config.github.org.clone())
        .context("organization is required: pass --org or set github.org in .drover/config.yaml")?;
    let repo = repo
        .or_else(|| config.github.repo.clone())
        .context("repository is required: pass --repo or set github.repo in .drover/config.yaml")?;
    Ok((org, repo))
}

/// Build the shared GitHub client from config, reading the token from
/// config or the `GITHUB_TOKEN` environment variable.
pub(crate) fn build_client(config: &Config) -> Result<Arc<GitHubClient>> {
    let credentials = match &config.github.token {
        Some(token) => Credentials::new(token),
        None => Credentials::from_env().map_err(|msg| anyhow::anyhow!(msg))?,
    };
    Ok(Arc::new(GitHubClient::with_base(
        credentials,
        &config.github.api_base,
    )))
}
