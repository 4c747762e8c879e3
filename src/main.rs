mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::check::{self, CheckCommandArgs};
use crate::config::GateConfig;
use crate::context::AppContext;
use crate::domain::verdict::Verdict;
use crate::error::AppResult;
use crate::infra::github::GithubClient;
use crate::infra::jira::JiraClient;
use crate::workflow::gate::GateOutcome;

#[derive(Parser)]
#[command(
    name = "refgate",
    author,
    version,
    about = "Pull request gate for commit ticket references"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the newest pull request commit for a valid ticket reference.
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Pull request number to inspect; defaults to the one named by GITHUB_REF.
    #[arg(short, long)]
    pr: Option<u64>,
    /// Check this message instead of fetching the pull request's newest commit.
    #[arg(short, long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<bool> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => run_check(args).await,
    }
}

async fn run_check(args: CheckArgs) -> AppResult<bool> {
    let config = GateConfig::from_env();

    if config.github_token.is_none() {
        eprintln!("Warning: GitHub access token not configured; GitHub ticket lookups will fail.");
    }
    if config.jira_token.is_none() {
        eprintln!("Warning: Jira access token not configured; Jira ticket lookups will fail.");
    }
    if config.jira_base_url.is_none() {
        eprintln!("Warning: Jira base URL not configured; Jira references will not resolve.");
    }

    let commit_source = Arc::new(GithubClient::new(
        config.github_api_base.clone(),
        config.repo_token.clone(),
    )?);
    let github_tracker = Arc::new(GithubClient::new(
        config.github_api_base.clone(),
        config.github_token.clone(),
    )?);
    let jira_tracker = Arc::new(JiraClient::new(config.jira_token.clone())?);

    let context = AppContext::new(config, commit_source, github_tracker, jira_tracker);

    let command_args = CheckCommandArgs {
        pull_number: args.pr,
        message: args.message,
    };
    let outcome = match check::run(&context, command_args).await {
        Ok(outcome) => outcome,
        Err(error) => {
            eprintln!("{}", check::remediation(&context.config));
            return Err(error);
        }
    };

    let passed = outcome.passed();
    match outcome {
        GateOutcome::MergeExempt => {
            println!("Merge commit detected; ticket check skipped.");
        }
        GateOutcome::Evaluated { ticket, verdict } => {
            if let Some(status) = &ticket.status {
                println!("Ticket status: {status}");
            }
            match verdict {
                Verdict::Pass => println!("All fine"),
                Verdict::Fail { reason } => eprintln!("{reason}"),
            }
        }
    }

    Ok(passed)
}
