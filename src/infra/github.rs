use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;

use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::infra::http_client;
use crate::services::{CommitSourceService, IssueTrackerService};

/// Talks to the GitHub REST API, both as the source of pull request commits
/// and as the tracker behind `#N` and `owner/repo#N` references.
pub struct GithubClient {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_base: String, token: Option<String>) -> AppResult<Self> {
        Ok(Self {
            http: http_client()?,
            api_base,
            token,
        })
    }

    fn token(&self) -> AppResult<&str> {
        self.token.as_deref().ok_or_else(|| {
            AppError::Configuration("GitHub access token not configured".to_string())
        })
    }

    fn auth_header(token: &str) -> String {
        let encoded = BASE64_STANDARD.encode(token);
        format!("Basic {encoded}")
    }

    fn commits_endpoint(&self, repo: &str, pull_number: u64) -> String {
        format!(
            "{}/repos/{}/pulls/{}/commits",
            self.api_base.trim_end_matches('/'),
            repo,
            pull_number
        )
    }
}

#[async_trait]
impl CommitSourceService for GithubClient {
    async fn latest_commit_message(&self, repo: &str, pull_number: u64) -> AppResult<String> {
        let token = self.token()?;
        let response = self
            .http
            .get(self.commits_endpoint(repo, pull_number))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::CommitSource(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::CommitSource(format!(
                "GitHub responded with {status} while listing commits for pull request #{pull_number}"
            )));
        }

        let commits: Vec<PullRequestCommit> = response.json().await.map_err(|err| {
            AppError::CommitSource(format!("failed to parse GitHub commit list: {err}"))
        })?;

        // The API returns commits in chronological order; the gate judges the
        // most recent one.
        commits
            .into_iter()
            .next_back()
            .map(|entry| entry.commit.message)
            .ok_or_else(|| {
                AppError::CommitSource(format!("pull request #{pull_number} has no commits"))
            })
    }
}

#[async_trait]
impl IssueTrackerService for GithubClient {
    async fn fetch_status(&self, ticket: &Ticket) -> AppResult<String> {
        let token = self.token()?;
        let response = self
            .http
            .get(&ticket.uri)
            .header(AUTHORIZATION, Self::auth_header(token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Tracker(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch {
                uri: ticket.uri.clone(),
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let issue: GithubIssue =
            response
                .json()
                .await
                .map_err(|err| AppError::MalformedResponse {
                    uri: ticket.uri.clone(),
                    detail: format!("failed to parse GitHub issue: {err}"),
                })?;

        Ok(issue.state)
    }
}

#[derive(Deserialize)]
struct PullRequestCommit {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Deserialize)]
struct GithubIssue {
    state: String,
}
