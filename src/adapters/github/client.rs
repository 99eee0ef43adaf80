//! GitHub HTTP client with rate limiting.
//!
//! Wraps the REST API v3 and the GraphQL v4 endpoint behind typed methods
//! for the operations the tracker and index adapters need. A token-bucket
//! rate limiter keeps the client under the 5 000 req/hour authenticated
//! API limit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};

use super::models::{
    AddLabelsRequest, CommentRequest, CreateIssueRequest, CreateIssueResponse, CreateLabelRequest,
    CreateMilestoneRequest, CreateTeamRequest, GraphQlRequest, GraphQlResponse, IssueSummary,
};

/// Default base URL for the GitHub API.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Explicit credentials for the GitHub API.
///
/// Passed into the client constructor; there is no process-wide token
/// state.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wrap a personal access or fine-grained token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from the `GITHUB_TOKEN` environment variable.
    pub fn from_env() -> Result<Self, String> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| "GITHUB_TOKEN environment variable is not set".to_string())?;
        if token.is_empty() {
            return Err("GITHUB_TOKEN environment variable is empty".to_string());
        }
        Ok(Self::new(token))
    }
}

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum tokens in the bucket.
    capacity: u32,
    /// Current available tokens.
    tokens: u32,
    /// Duration of the refill window.
    window: Duration,
    /// When the current window started.
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    ///
    /// If the current window has elapsed, the bucket is refilled. If no
    /// tokens are available, this method sleeps until the window resets.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = remaining.as_millis() as u64,
                "GitHub rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }
}

/// HTTP client for the GitHub API.
///
/// All methods return [`DomainResult`] and map HTTP / network errors to
/// [`DomainError::RemoteWrite`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// API credentials.
    credentials: Credentials,
    /// Base URL; overridable for GitHub Enterprise and for tests.
    base: String,
    /// Shared rate limiter (5 000 req/hr for authenticated requests).
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base(credentials, GITHUB_API_BASE)
    }

    /// Create a client against a specific base URL.
    pub fn with_base(credentials: Credentials, base: impl Into<String>) -> Self {
        let rate_limiter = RateLimiter::new(5_000, Duration::from_secs(3_600));
        Self {
            http: Client::new(),
            credentials,
            base: base.into().trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(
        &self,
        method: reqwest::Method,
        url: &str,
    ) -> reqwest::RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.credentials.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "drover")
    }

    /// Send a request and fail unless the response status is a success.
    async fn send_checked(
        &self,
        req: reqwest::RequestBuilder,
        op: &str,
    ) -> DomainResult<reqwest::Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| DomainError::RemoteWrite(format!("GitHub {op} request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::RemoteWrite(format!(
                "GitHub {op} returned {status}: {body}"
            )));
        }
        Ok(resp)
    }

    /// Create a new issue in a repository.
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: Option<&str>,
        labels: Vec<String>,
        assignees: Vec<String>,
    ) -> DomainResult<CreateIssueResponse> {
        let url = format!("{}/repos/{}/{}/issues", self.base, owner, repo);
        let req_body = CreateIssueRequest {
            title: title.to_string(),
            body: body.map(str::to_string),
            labels: (!labels.is_empty()).then_some(labels),
            assignees: (!assignees.is_empty()).then_some(assignees),
        };

        let req = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body);
        let resp = self.send_checked(req, "create_issue").await?;

        resp.json::<CreateIssueResponse>().await.map_err(|e| {
            DomainError::RemoteWrite(format!("GitHub create_issue parse failed: {e}"))
        })
    }

    /// Create a label, treating "already exists" as success.
    ///
    /// GitHub answers 422 when the label name is taken, which is exactly
    /// the state this call wants to reach.
    pub async fn ensure_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
        description: &str,
    ) -> DomainResult<()> {
        let url = format!("{}/repos/{}/{}/labels", self.base, owner, repo);
        let req_body = CreateLabelRequest {
            name: name.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        };

        let resp = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body)
            .send()
            .await
            .map_err(|e| {
                DomainError::RemoteWrite(format!("GitHub ensure_label request failed: {e}"))
            })?;

        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(DomainError::RemoteWrite(format!(
            "GitHub ensure_label returned {status}: {body}"
        )))
    }

    /// Post a comment on an issue.
    pub async fn post_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        comment: &str,
    ) -> DomainResult<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base, owner, repo, issue_number
        );
        let req_body = CommentRequest {
            body: comment.to_string(),
        };

        let req = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body);
        self.send_checked(req, "post_comment").await?;
        Ok(())
    }

    /// Add labels to an existing issue.
    pub async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: Vec<String>,
    ) -> DomainResult<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.base, owner, repo, issue_number
        );
        let req_body = AddLabelsRequest { labels };

        let req = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body);
        self.send_checked(req, "add_labels").await?;
        Ok(())
    }

    /// Create a milestone, treating "already exists" as success.
    pub async fn create_milestone(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        description: Option<&str>,
        due_on: Option<&str>,
    ) -> DomainResult<()> {
        let url = format!("{}/repos/{}/{}/milestones", self.base, owner, repo);
        let req_body = CreateMilestoneRequest {
            title: title.to_string(),
            description: description.map(str::to_string),
            due_on: due_on.map(str::to_string),
        };

        let resp = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body)
            .send()
            .await
            .map_err(|e| {
                DomainError::RemoteWrite(format!("GitHub create_milestone request failed: {e}"))
            })?;

        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(DomainError::RemoteWrite(format!(
            "GitHub create_milestone returned {status}: {body}"
        )))
    }

    /// Create an organization team, treating "already exists" as success.
    pub async fn ensure_team(&self, org: &str, name: &str, description: &str) -> DomainResult<()> {
        let url = format!("{}/orgs/{}/teams", self.base, org);
        let req_body = CreateTeamRequest {
            name: name.to_string(),
            description: description.to_string(),
            privacy: "closed".to_string(),
        };

        let resp = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body)
            .send()
            .await
            .map_err(|e| {
                DomainError::RemoteWrite(format!("GitHub ensure_team request failed: {e}"))
            })?;

        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(DomainError::RemoteWrite(format!(
            "GitHub ensure_team returned {status}: {body}"
        )))
    }

    /// Add (or invite) a member to a team. Idempotent on GitHub's side.
    pub async fn add_team_member(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> DomainResult<()> {
        let url = format!(
            "{}/orgs/{}/teams/{}/memberships/{}",
            self.base, org, team_slug, username
        );

        let req = self
            .rate_limited_request(reqwest::Method::PUT, &url)
            .await
            .json(&serde_json::json!({ "role": "member" }));
        self.send_checked(req, "add_team_member").await?;
        Ok(())
    }

    /// List issues from a repository, all states, first page of 100.
    ///
    /// The endpoint also returns pull requests; callers filter them out via
    /// the `pull_request` field.
    pub async fn list_issues(&self, owner: &str, repo: &str) -> DomainResult<Vec<IssueSummary>> {
        let url = format!(
            "{}/repos/{}/{}/issues?state=all&per_page=100",
            self.base, owner, repo
        );

        let req = self.rate_limited_request(reqwest::Method::GET, &url).await;
        let resp = self.send_checked(req, "list_issues").await?;

        resp.json::<Vec<IssueSummary>>()
            .await
            .map_err(|e| DomainError::RemoteWrite(format!("GitHub list_issues parse failed: {e}")))
    }

    /// Execute a GraphQL query or mutation and return its `data` tree.
    ///
    /// GraphQL failures come back as 200s with an `errors` array; those are
    /// mapped to [`DomainError::RemoteWrite`] like any other failure.
    pub async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> DomainResult<serde_json::Value> {
        let url = format!("{}/graphql", self.base);
        let req_body = GraphQlRequest {
            query: query.to_string(),
            variables,
        };

        let req = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&req_body);
        let resp = self.send_checked(req, "graphql").await?;

        let envelope = resp
            .json::<GraphQlResponse>()
            .await
            .map_err(|e| DomainError::RemoteWrite(format!("GitHub graphql parse failed: {e}")))?;

        if let Some(error) = envelope.errors.first() {
            return Err(DomainError::RemoteWrite(format!(
                "GitHub graphql error: {}",
                error.message
            )));
        }
        envelope
            .data
            .ok_or_else(|| DomainError::RemoteWrite("GitHub graphql returned no data".to_string()))
    }
}
