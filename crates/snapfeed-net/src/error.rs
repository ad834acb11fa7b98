use snapfeed_shared::ValidationError;
use thiserror::Error;

/// Failures talking to the remote photo source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request rejected, connection refused or timed out.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Photo API answered {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The body was JSON but did not match the expected record shape.
    #[error("Malformed response: {0}")]
    Malformed(#[from] ValidationError),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No photo API access key configured")]
    MissingCredentials,
}

impl SourceError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Network(_) => true,
            SourceError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, SourceError::Malformed(_) | SourceError::Decode(_))
    }
}
