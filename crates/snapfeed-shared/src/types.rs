use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an image by the photo API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The user who uploaded an image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub username: String,
    pub name: Option<String>,
}

/// Resolution variants of a single image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ImageUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    #[serde(default)]
    pub small: String,
    pub thumb: String,
}

/// A comment attached to an image. Never populated by the photo API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One image in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: ImageId,
    pub user: UserRef,
    pub urls: ImageUrls,
    pub likes: u32,
    /// Country the photo was taken in, when the uploader shared it.
    pub location: Option<String>,
    pub alt_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl ImageRecord {
    pub fn add_like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    /// Counters never go below zero, even if the remote count was stale.
    pub fn remove_like(&mut self) {
        self.likes = self.likes.saturating_sub(1);
    }
}

/// A photo listed on a user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfilePhoto {
    pub id: ImageId,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub urls: ImageUrls,
}

/// Public metadata of a remote user, with their most recent photos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub followers_count: u32,
    pub following_count: u32,
    /// URL of the large avatar variant.
    pub profile_image: String,
    pub photos: Vec<ProfilePhoto>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}
