//! Canned photo sources for controller tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use snapfeed_net::{PhotoSource, SourceError};
use snapfeed_shared::{ImageId, ImageRecord, ImageUrls, ProfilePhoto, UserProfile, UserRef};

pub fn image(id: &str, likes: u32) -> ImageRecord {
    ImageRecord {
        id: ImageId::new(id),
        user: UserRef {
            username: format!("{id}-owner"),
            name: None,
        },
        urls: ImageUrls {
            raw: format!("https://img.test/{id}/raw"),
            full: format!("https://img.test/{id}/full"),
            regular: format!("https://img.test/{id}/regular"),
            small: format!("https://img.test/{id}/small"),
            thumb: format!("https://img.test/{id}/thumb"),
        },
        likes,
        location: None,
        alt_description: Some(format!("photo {id}")),
        description: None,
        created_at: None,
        comments: Vec::new(),
    }
}

pub fn profile(username: &str, photo_ids: &[&str]) -> UserProfile {
    UserProfile {
        username: username.to_string(),
        first_name: "Test".to_string(),
        last_name: Some("User".to_string()),
        bio: Some("bio".to_string()),
        followers_count: 5,
        following_count: 7,
        profile_image: format!("https://img.test/{username}/avatar"),
        photos: photo_ids
            .iter()
            .map(|id| ProfilePhoto {
                id: ImageId::new(*id),
                slug: Some(format!("{id}-slug")),
                created_at: chrono::Utc::now(),
                urls: image(id, 0).urls,
            })
            .collect(),
    }
}

/// Serves numbered images (`img-0`, `img-1`, ...) and profiles for any
/// username, optionally failing every call.
#[derive(Default)]
pub struct CannedSource {
    next_id: AtomicU32,
    random_calls: AtomicU32,
    profile_calls: AtomicU32,
    failing: bool,
    pub requested_counts: Mutex<Vec<u32>>,
}

impl CannedSource {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn random_calls(&self) -> u32 {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> u32 {
        self.profile_calls.load(Ordering::SeqCst)
    }

    fn unavailable(endpoint: &str) -> SourceError {
        SourceError::Status {
            status: 503,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl PhotoSource for CannedSource {
    async fn random_photos(&self, count: u32) -> Result<Vec<ImageRecord>, SourceError> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_counts.lock().unwrap().push(count);
        if self.failing {
            return Err(Self::unavailable("/photos/random"));
        }
        Ok((0..count)
            .map(|_| {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst);
                image(&format!("img-{n}"), n)
            })
            .collect())
    }

    async fn user_profile(&self, username: &str) -> Result<UserProfile, SourceError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Self::unavailable("/users"));
        }
        Ok(profile(username, &["p1", "p2", "p3"]))
    }
}
