use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error queuing job [{status}]: {body}")]
    SubmissionRejected { status: StatusCode, body: String },

    #[error("Malformed job handle: {0}")]
    MalformedHandle(String),

    #[error("Gave up polling {status_path} after {attempts} attempts")]
    PollAttemptsExhausted { status_path: String, attempts: u32 },

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}
