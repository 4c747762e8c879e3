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
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    token: Option<String>,
}

impl JiraClient {
    pub fn new(token: Option<String>) -> AppResult<Self> {
        Ok(Self {
            http: http_client()?,
            token,
        })
    }

    fn token(&self) -> AppResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Jira API token not configured".to_string()))
    }

    fn auth_header(token: &str) -> String {
        let encoded = BASE64_STANDARD.encode(token);
        format!("Basic {encoded}")
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn fetch_status(&self, ticket: &Ticket) -> AppResult<String> {
        let token = self.token()?;
        let response = self
            .http
            .get(&ticket.uri)
            .header(AUTHORIZATION, Self::auth_header(token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Tracker(format!("failed to call Jira: {err}")))?;

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

        let issue: JiraIssue =
            response
                .json()
                .await
                .map_err(|err| AppError::MalformedResponse {
                    uri: ticket.uri.clone(),
                    detail: format!("failed to parse Jira issue: {err}"),
                })?;

        Ok(issue.fields.status.name)
    }
}

#[derive(Deserialize)]
struct JiraIssue {
    fields: JiraFields,
}

#[derive(Deserialize)]
struct JiraFields {
    status: JiraStatus,
}

#[derive(Deserialize)]
struct JiraStatus {
    name: String,
}
