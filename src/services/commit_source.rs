use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait CommitSourceService: Send + Sync {
    async fn latest_commit_message(&self, repo: &str, pull_number: u64) -> AppResult<String>;
}
