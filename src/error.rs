use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Package manager execution failed: {0}")]
    PackageManager(String),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Pull request creation failed: {0}")]
    PullRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, UpdateError>;
