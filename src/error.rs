use thiserror::Error;

/// Coarse classification of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The search request itself failed (network, DNS, timeout, HTTP status).
    Transport,
    /// Anything after the page arrived: parsing, serialization, filesystem.
    Unexpected,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("error during request: {0}")]
    Transport(String),

    #[error("{url} responded with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Transport(_) | SearchError::Status { .. } => ErrorKind::Transport,
            SearchError::Selector(_) | SearchError::Io(_) | SearchError::Json(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SearchError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => SearchError::Transport(err.to_string()),
        }
    }
}
