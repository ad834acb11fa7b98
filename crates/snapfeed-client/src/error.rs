use thiserror::Error;

use snapfeed_net::SourceError;
use snapfeed_shared::ImageId;
use snapfeed_store::StoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Photo source error: {0}")]
    Source(#[from] SourceError),

    #[error("Local storage error: {0}")]
    Store(#[from] StoreError),

    #[error("No image with id {0} in the feed")]
    UnknownImage(ImageId),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The request needed the photo API but no access key was configured.
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, ClientError::Source(SourceError::MissingCredentials))
    }
}
