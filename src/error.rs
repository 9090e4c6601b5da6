// src/error.rs

/// Why a commit could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
    #[error("commit `{0}` not found")]
    NotFound(String),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
