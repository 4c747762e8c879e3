pub mod commit_source;
pub mod issue_tracker;

pub use commit_source::CommitSourceService;
pub use issue_tracker::IssueTrackerService;
