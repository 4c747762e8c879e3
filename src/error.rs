use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no ticket reference found in commit message")]
    NoReferenceFound,
    #[error("unresolved ticket reference: {token}")]
    UnresolvedReference { token: String },
    #[error("commit source error: {0}")]
    CommitSource(String),
    #[error("issue tracker error: {0}")]
    Tracker(String),
    #[error("issue lookup failed: {uri}: {status} {status_text}")]
    Fetch {
        uri: String,
        status: u16,
        status_text: String,
    },
    #[error("malformed tracker response from {uri}: {detail}")]
    MalformedResponse { uri: String, detail: String },
}

pub type AppResult<T> = Result<T, AppError>;
