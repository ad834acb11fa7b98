use std::sync::Arc;

use async_trait::async_trait;
use snapfeed_shared::{ImageRecord, UserProfile};

use crate::error::SourceError;

/// Anything that can serve random photos and user profiles.
///
/// [`crate::UnsplashClient`] is the production implementation; tests plug
/// in canned sources.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch `count` random photos. The batch succeeds or fails as a whole.
    async fn random_photos(&self, count: u32) -> Result<Vec<ImageRecord>, SourceError>;

    /// Fetch a user's profile together with their embedded photo list.
    async fn user_profile(&self, username: &str) -> Result<UserProfile, SourceError>;
}

#[async_trait]
impl<T: PhotoSource + ?Sized> PhotoSource for Arc<T> {
    async fn random_photos(&self, count: u32) -> Result<Vec<ImageRecord>, SourceError> {
        (**self).random_photos(count).await
    }

    async fn user_profile(&self, username: &str) -> Result<UserProfile, SourceError> {
        (**self).user_profile(username).await
    }
}

/// `None` stands for a source that was never configured, e.g. no API key.
/// Every request fails with [`SourceError::MissingCredentials`], so callers
/// that can be served from local data never notice the gap.
#[async_trait]
impl<T: PhotoSource> PhotoSource for Option<T> {
    async fn random_photos(&self, count: u32) -> Result<Vec<ImageRecord>, SourceError> {
        match self {
            Some(source) => source.random_photos(count).await,
            None => Err(SourceError::MissingCredentials),
        }
    }

    async fn user_profile(&self, username: &str) -> Result<UserProfile, SourceError> {
        match self {
            Some(source) => source.user_profile(username).await,
            None => Err(SourceError::MissingCredentials),
        }
    }
}
