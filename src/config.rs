use std::env;

const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub current_repo: Option<String>,
    pub pull_number: Option<u64>,
    pub github_token: Option<String>,
    pub jira_token: Option<String>,
    pub repo_token: Option<String>,
    pub github_api_base: String,
    pub jira_base_url: Option<String>,
    pub jira_projects: Vec<String>,
    pub rejected_statuses: Vec<String>,
}

impl GateConfig {
    /// Reads the gate's settings from the environment: action inputs first,
    /// then the ambient variables GitHub Actions provides.
    pub fn from_env() -> Self {
        Self {
            current_repo: env_var("GITHUB_REPOSITORY"),
            pull_number: env_var("GITHUB_REF").as_deref().and_then(pull_number_from_ref),
            github_token: input("githubAccessToken").or_else(|| env_var("GITHUB_TOKEN")),
            jira_token: input("jiraAccessToken").or_else(|| env_var("JIRA_TOKEN")),
            repo_token: input("curRepoToken").or_else(|| env_var("GITHUB_TOKEN")),
            github_api_base: env_var("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string()),
            jira_base_url: input("jiraBaseUrl").or_else(|| env_var("JIRA_BASE_URL")),
            jira_projects: input("jiraProjects")
                .or_else(|| env_var("JIRA_PROJECTS"))
                .map(|raw| parse_key_list(&raw))
                .unwrap_or_else(default_jira_projects),
            rejected_statuses: input("rejectedStatuses")
                .map(|raw| parse_key_list(&raw))
                .unwrap_or_else(default_rejected_statuses),
        }
    }
}

/// Reads a GitHub Actions input, which the runner exposes as `INPUT_<NAME>`.
fn input(name: &str) -> Option<String> {
    env_var(&format!("INPUT_{}", name.to_uppercase()))
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn default_jira_projects() -> Vec<String> {
    vec!["CB".to_string()]
}

fn default_rejected_statuses() -> Vec<String> {
    vec!["closed".to_string(), "done".to_string()]
}

fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.to_string())
        .collect()
}

/// Extracts the pull request number from a ref like `refs/pull/88/merge`.
fn pull_number_from_ref(git_ref: &str) -> Option<u64> {
    git_ref
        .strip_prefix("refs/pull/")?
        .split('/')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_keys() {
        assert_eq!(parse_key_list("CB"), vec!["CB"]);
        assert_eq!(parse_key_list("CB, DB ,WEB"), vec!["CB", "DB", "WEB"]);
        assert_eq!(parse_key_list(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn extracts_pull_number_from_merge_ref() {
        assert_eq!(pull_number_from_ref("refs/pull/88/merge"), Some(88));
        assert_eq!(pull_number_from_ref("refs/pull/1/head"), Some(1));
        assert_eq!(pull_number_from_ref("refs/heads/main"), None);
        assert_eq!(pull_number_from_ref("refs/pull/x/merge"), None);
    }

    #[test]
    fn default_sets_match_reference_behavior() {
        assert_eq!(default_jira_projects(), vec!["CB"]);
        assert_eq!(default_rejected_statuses(), vec!["closed", "done"]);
    }
}
