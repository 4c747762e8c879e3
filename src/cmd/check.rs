use crate::config::GateConfig;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::workflow::gate::{self, GateOutcome};

#[derive(Debug, Clone)]
pub struct CheckCommandArgs {
    pub pull_number: Option<u64>,
    pub message: Option<String>,
}

pub async fn run(ctx: &AppContext, args: CheckCommandArgs) -> AppResult<GateOutcome> {
    let message = match args.message {
        Some(message) => message,
        None => fetch_latest_message(ctx, args.pull_number).await?,
    };

    println!("Checking commit message: {message}");
    gate::evaluate_message(ctx, &message).await
}

async fn fetch_latest_message(ctx: &AppContext, pull_number: Option<u64>) -> AppResult<String> {
    let repo = ctx.config.current_repo.as_deref().ok_or_else(|| {
        AppError::Configuration("current repository not configured (GITHUB_REPOSITORY)".to_string())
    })?;
    let number = pull_number.or(ctx.config.pull_number).ok_or_else(|| {
        AppError::Configuration(
            "pull request number not provided and GITHUB_REF does not name one".to_string(),
        )
    })?;

    ctx.commit_source.latest_commit_message(repo, number).await
}

/// Guidance printed when a commit message is rejected, listing every
/// reference form the gate accepts.
pub fn remediation(config: &GateConfig) -> String {
    let mut lines = vec![
        "Each commit message must begin with a GitHub or Jira ticket reference. Like:".to_string(),
        "  *  #<issue_number>".to_string(),
        "  *  <org>/<repo>#<issue_number>".to_string(),
    ];
    for project in &config.jira_projects {
        lines.push(format!("  *  {project}-<number> (Jira)"));
    }
    lines.push(String::new());
    lines.push("For how to reword your commit message, follow this GitHub doc:".to_string());
    lines.push(
        "https://docs.github.com/en/pull-requests/committing-changes-to-your-project/creating-and-editing-commits/changing-a-commit-message"
            .to_string(),
    );
    lines.join("\n")
}
