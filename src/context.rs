use std::sync::Arc;

use crate::config::GateConfig;
use crate::services::{CommitSourceService, IssueTrackerService};

#[derive(Clone)]
pub struct AppContext {
    pub config: GateConfig,
    pub commit_source: Arc<dyn CommitSourceService>,
    pub github_tracker: Arc<dyn IssueTrackerService>,
    pub jira_tracker: Arc<dyn IssueTrackerService>,
}

impl AppContext {
    pub fn new(
        config: GateConfig,
        commit_source: Arc<dyn CommitSourceService>,
        github_tracker: Arc<dyn IssueTrackerService>,
        jira_tracker: Arc<dyn IssueTrackerService>,
    ) -> Self {
        Self {
            config,
            commit_source,
            github_tracker,
            jira_tracker,
        }
    }
}
