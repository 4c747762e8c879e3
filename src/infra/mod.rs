use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult};

pub mod github;
pub mod jira;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client shared by the tracker integrations. Every request
/// carries a timeout so a stalled tracker cannot hang the gate forever.
pub fn http_client() -> AppResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))
}
