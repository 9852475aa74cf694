use thiserror::Error;

/// Errors raised while fetching or interpreting the remote feed.
/// All of these are downgraded to the Degraded outcome by the reconciler;
/// they never surface as hard failures to consumers.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No data rows in feed payload")]
    EmptyPayload,

    #[error("Malformed feed payload: {0}")]
    MalformedPayload(String),
}

/// Caller errors from the analysis surface; surfaced to the caller
/// before any diagnostic is computed
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Duration must be at least one month, got {0}")]
    InvalidDuration(u32),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::MalformedPayload(err.to_string())
        } else {
            FeedError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedPayload(err.to_string())
    }
}
