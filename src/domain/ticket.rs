use std::fmt;

use regex::Regex;

use crate::config::GateConfig;
use crate::domain::reference::Token;
use crate::error::{AppError, AppResult};

// These forms must stay in sync with the extractor's alternatives; a token
// that extracts but resolves nowhere is reported as an unresolved reference.
const LOCAL_FORM: &str = r"^#(\d+)";
const JIRA_FORM: &str = r"^[A-Z]+-\d{1,6}";
const FOREIGN_FORM: &str = r"^(\w+(?:-\w+)?)/(\w+(?:-\w+)?)#(\d{1,6})";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Board {
    LocalRepo,
    ForeignRepo { owner: String, name: String },
    Jira,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Board::LocalRepo => write!(f, "this repository"),
            Board::ForeignRepo { owner, name } => write!(f, "{owner}/{name}"),
            Board::Jira => write!(f, "jira"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub board: Board,
    pub id: String,
    pub uri: String,
    pub status: Option<String>,
}

impl Ticket {
    /// Status is assigned once, after the single tracker read.
    pub fn set_status(&mut self, status: String) {
        self.status = Some(status);
    }
}

pub struct TicketResolver {
    github_api_base: String,
    jira_base_url: Option<String>,
    current_repo: Option<String>,
    jira_projects: Vec<String>,
    local_form: Regex,
    jira_form: Regex,
    foreign_form: Regex,
}

impl TicketResolver {
    pub fn new(config: &GateConfig) -> AppResult<Self> {
        Ok(Self {
            github_api_base: config.github_api_base.clone(),
            jira_base_url: config.jira_base_url.clone(),
            current_repo: config.current_repo.clone(),
            jira_projects: config.jira_projects.clone(),
            local_form: compile(LOCAL_FORM)?,
            jira_form: compile(JIRA_FORM)?,
            foreign_form: compile(FOREIGN_FORM)?,
        })
    }

    pub fn resolve(&self, token: &Token) -> AppResult<Ticket> {
        let text = token.as_str();

        if text.starts_with('#') {
            let id = self
                .local_form
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|id| id.as_str().to_string())
                .ok_or_else(|| unresolved(token))?;
            let repo = self.current_repo.as_deref().ok_or_else(|| {
                AppError::Configuration(
                    "current repository not configured (GITHUB_REPOSITORY)".to_string(),
                )
            })?;
            let uri = format!("{}/repos/{}/issues/{}", self.github_base(), repo, id);
            return Ok(Ticket {
                board: Board::LocalRepo,
                id,
                uri,
                status: None,
            });
        }

        // The Jira branch runs before the cross-repo form, matching the
        // extractor's alternative order.
        if self.is_allowed_jira_prefix(text) {
            let id = self
                .jira_form
                .find(text)
                .map(|matched| matched.as_str().to_string())
                .ok_or_else(|| unresolved(token))?;
            let base = self.jira_base_url.as_deref().ok_or_else(|| {
                AppError::Configuration("Jira base URL not configured".to_string())
            })?;
            let uri = format!("{}/rest/api/2/issue/{}", base.trim_end_matches('/'), id);
            return Ok(Ticket {
                board: Board::Jira,
                id,
                uri,
                status: None,
            });
        }

        if let Some(caps) = self.foreign_form.captures(text) {
            if let (Some(owner), Some(name), Some(id)) = (caps.get(1), caps.get(2), caps.get(3)) {
                let uri = format!(
                    "{}/repos/{}/{}/issues/{}",
                    self.github_base(),
                    owner.as_str(),
                    name.as_str(),
                    id.as_str()
                );
                return Ok(Ticket {
                    board: Board::ForeignRepo {
                        owner: owner.as_str().to_string(),
                        name: name.as_str().to_string(),
                    },
                    id: id.as_str().to_string(),
                    uri,
                    status: None,
                });
            }
        }

        Err(unresolved(token))
    }

    fn github_base(&self) -> &str {
        self.github_api_base.trim_end_matches('/')
    }

    fn is_allowed_jira_prefix(&self, text: &str) -> bool {
        match text.split_once('-') {
            Some((prefix, _)) => self
                .jira_projects
                .iter()
                .any(|key| key.eq_ignore_ascii_case(prefix)),
            None => false,
        }
    }
}

fn compile(pattern: &str) -> AppResult<Regex> {
    Regex::new(pattern)
        .map_err(|err| AppError::Configuration(format!("invalid resolver pattern: {err}")))
}

fn unresolved(token: &Token) -> AppError {
    AppError::UnresolvedReference {
        token: token.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GateConfig {
        GateConfig {
            current_repo: Some("acme/widgets".to_string()),
            pull_number: None,
            github_token: None,
            jira_token: None,
            repo_token: None,
            github_api_base: "https://api.github.com".to_string(),
            jira_base_url: Some("https://acme.atlassian.net".to_string()),
            jira_projects: vec!["CB".to_string()],
            rejected_statuses: vec!["closed".to_string(), "done".to_string()],
        }
    }

    fn resolve(token: &str) -> AppResult<Ticket> {
        resolve_with(config(), token)
    }

    fn resolve_with(config: GateConfig, token: &str) -> AppResult<Ticket> {
        TicketResolver::new(&config)
            .unwrap()
            .resolve(&Token(token.to_string()))
    }

    #[test]
    fn resolves_local_issue_against_current_repo() {
        let ticket = resolve("#42").unwrap();
        assert_eq!(ticket.board, Board::LocalRepo);
        assert_eq!(ticket.id, "42");
        assert_eq!(
            ticket.uri,
            "https://api.github.com/repos/acme/widgets/issues/42"
        );
        assert_eq!(ticket.status, None);
    }

    #[test]
    fn local_issue_requires_a_current_repo() {
        let mut cfg = config();
        cfg.current_repo = None;
        let err = resolve_with(cfg, "#42").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn resolves_allow_listed_jira_key() {
        let ticket = resolve("CB-1000").unwrap();
        assert_eq!(ticket.board, Board::Jira);
        assert_eq!(ticket.id, "CB-1000");
        assert_eq!(
            ticket.uri,
            "https://acme.atlassian.net/rest/api/2/issue/CB-1000"
        );
    }

    #[test]
    fn trims_trailing_slash_from_jira_base() {
        let mut cfg = config();
        cfg.jira_base_url = Some("https://acme.atlassian.net/".to_string());
        let ticket = resolve_with(cfg, "CB-7").unwrap();
        assert_eq!(ticket.uri, "https://acme.atlassian.net/rest/api/2/issue/CB-7");
    }

    #[test]
    fn jira_key_requires_a_base_url() {
        let mut cfg = config();
        cfg.jira_base_url = None;
        let err = resolve_with(cfg, "CB-7").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn lowercase_jira_key_is_unresolved() {
        let err = resolve("cb-123").unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference { .. }));
    }

    #[test]
    fn jira_key_outside_allow_list_is_unresolved() {
        let err = resolve("DB-4567").unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference { .. }));
    }

    #[test]
    fn allow_list_is_configurable() {
        let mut cfg = config();
        cfg.jira_projects = vec!["CB".to_string(), "DB".to_string()];
        let ticket = resolve_with(cfg, "DB-4567").unwrap();
        assert_eq!(ticket.board, Board::Jira);
        assert_eq!(ticket.id, "DB-4567");
    }

    #[test]
    fn resolves_cross_repo_issue() {
        let ticket = resolve("db-beaver/core#57").unwrap();
        assert_eq!(
            ticket.board,
            Board::ForeignRepo {
                owner: "db-beaver".to_string(),
                name: "core".to_string(),
            }
        );
        assert_eq!(ticket.id, "57");
        assert_eq!(
            ticket.uri,
            "https://api.github.com/repos/db-beaver/core/issues/57"
        );
    }

    #[test]
    fn unmatched_tokens_are_unresolved() {
        assert!(matches!(
            resolve("Merge").unwrap_err(),
            AppError::UnresolvedReference { .. }
        ));
        assert!(matches!(
            resolve("plain words").unwrap_err(),
            AppError::UnresolvedReference { .. }
        ));
    }

    #[test]
    fn board_display_names_the_scope() {
        assert_eq!(Board::LocalRepo.to_string(), "this repository");
        assert_eq!(
            Board::ForeignRepo {
                owner: "db-beaver".to_string(),
                name: "core".to_string(),
            }
            .to_string(),
            "db-beaver/core"
        );
        assert_eq!(Board::Jira.to_string(), "jira");
    }
}
