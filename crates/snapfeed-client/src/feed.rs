//! Feed controller: the growing image list, session likes and the cache.
//!
//! State changes go through [`FeedState::apply`], a pure
//! `(state, event) -> state` function. [`FeedController`] performs the side
//! effects (network, storage) and feeds their outcome back as events.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use snapfeed_net::PhotoSource;
use snapfeed_shared::{ImageId, ImageRecord};
use snapfeed_store::{CacheSnapshot, Database};

use crate::error::ClientError;

/// Tunables for a [`FeedController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub cache_key: String,
    pub cache_ttl: Duration,
    pub fetch_count: u32,
    pub max_images: Option<usize>,
}

/// Everything the presentation layer renders for the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub images: Vec<ImageRecord>,
    pub liked: HashSet<ImageId>,
    pub dark_mode: bool,
    /// Set once the feed has been filled from the cache or the network.
    pub initialized: bool,
    /// Message of the most recent failed fetch, cleared by the next success.
    pub last_error: Option<String>,
    /// Oldest images are dropped beyond this many.
    pub max_images: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A fresh snapshot replaces the current list.
    CacheAdopted(Vec<ImageRecord>),
    /// A fetched batch is appended.
    ImagesFetched(Vec<ImageRecord>),
    FetchFailed(String),
    LikeToggled(ImageId),
    DarkModeToggled,
}

impl FeedState {
    pub fn with_max_images(max_images: Option<usize>) -> Self {
        Self {
            max_images,
            ..Self::default()
        }
    }

    pub fn apply(mut self, event: FeedEvent) -> Self {
        match event {
            FeedEvent::CacheAdopted(images) => {
                self.images = images;
                self.initialized = true;
                self.last_error = None;
                self.enforce_cap();
            }
            FeedEvent::ImagesFetched(mut batch) => {
                for image in &mut batch {
                    image.comments = Vec::new();
                }
                self.images.extend(batch);
                self.initialized = true;
                self.last_error = None;
                self.enforce_cap();
            }
            FeedEvent::FetchFailed(message) => {
                self.last_error = Some(message);
            }
            FeedEvent::LikeToggled(id) => {
                // Likes on ids outside the feed are ignored. The same photo can
                // come back in a later batch; every copy shares one count.
                if self.image(&id).is_some() {
                    let unliking = self.liked.remove(&id);
                    for image in self.images.iter_mut().filter(|img| img.id == id) {
                        if unliking {
                            image.remove_like();
                        } else {
                            image.add_like();
                        }
                    }
                    if !unliking {
                        self.liked.insert(id);
                    }
                }
            }
            FeedEvent::DarkModeToggled => {
                self.dark_mode = !self.dark_mode;
            }
        }
        self
    }

    pub fn is_liked(&self, id: &ImageId) -> bool {
        self.liked.contains(id)
    }

    pub fn image(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.images.iter().find(|img| &img.id == id)
    }

    fn enforce_cap(&mut self) {
        let Some(max) = self.max_images else {
            return;
        };
        if self.images.len() <= max {
            return;
        }
        let excess = self.images.len() - max;
        let dropped: Vec<ImageRecord> = self.images.drain(..excess).collect();
        for image in dropped {
            if self.image(&image.id).is_none() {
                self.liked.remove(&image.id);
            }
        }
    }
}

/// How [`FeedController::initialize`] filled the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    AlreadyInitialized,
    FromCache(usize),
    Fetched(usize),
}

pub struct FeedController<S> {
    source: S,
    store: Database,
    settings: FeedSettings,
    state: FeedState,
}

impl<S: PhotoSource> FeedController<S> {
    pub fn new(source: S, store: Database, settings: FeedSettings) -> Self {
        let state = FeedState::with_max_images(settings.max_images);
        Self {
            source,
            store,
            settings,
            state,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn store(&self) -> &Database {
        &self.store
    }

    fn dispatch(&mut self, event: FeedEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    /// Fill the feed from a fresh cache snapshot, or fetch the first batch.
    pub async fn initialize(&mut self) -> Result<InitOutcome, ClientError> {
        self.initialize_at(Utc::now()).await
    }

    pub async fn initialize_at(&mut self, now: DateTime<Utc>) -> Result<InitOutcome, ClientError> {
        if self.state.initialized {
            debug!("feed already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        if let Some(snapshot) = self.fresh_snapshot(now) {
            let count = snapshot.images.len();
            info!(images = count, "feed restored from cache");
            self.dispatch(FeedEvent::CacheAdopted(snapshot.images));
            return Ok(InitOutcome::FromCache(count));
        }

        let fetched = self.fetch_more(self.settings.fetch_count).await?;
        Ok(InitOutcome::Fetched(fetched))
    }

    fn fresh_snapshot(&self, now: DateTime<Utc>) -> Option<CacheSnapshot> {
        let snapshot = match self.store.load_snapshot(&self.settings.cache_key) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "unreadable feed cache, ignoring it");
                return None;
            }
        };

        let age = snapshot.age_at(now);
        if snapshot.is_fresh_at(now, self.settings.cache_ttl) {
            Some(snapshot)
        } else {
            debug!(age_secs = age.as_secs(), "feed cache is stale");
            None
        }
    }

    /// Append `count` more random images and persist the merged list.
    ///
    /// On failure the feed is left as it was and the error is recorded in
    /// [`FeedState::last_error`] as well as returned.
    pub async fn fetch_more(&mut self, count: u32) -> Result<usize, ClientError> {
        let batch = match self.source.random_photos(count).await {
            Ok(batch) => batch,
            Err(e) => {
                error!(error = %e, count, "failed to fetch images");
                self.dispatch(FeedEvent::FetchFailed(e.to_string()));
                return Err(e.into());
            }
        };

        let received = batch.len();
        self.dispatch(FeedEvent::ImagesFetched(batch));
        info!(received, total = self.state.images.len(), "feed extended");

        // The snapshot is taken after the merge so it matches the feed exactly.
        let snapshot = CacheSnapshot::new(self.state.images.clone(), Utc::now());
        if let Err(e) = self.store.save_snapshot(&self.settings.cache_key, &snapshot) {
            warn!(error = %e, "failed to write feed cache");
        }

        Ok(received)
    }

    /// Like or unlike an image. Returns whether it is liked afterwards.
    pub fn toggle_like(&mut self, id: &ImageId) -> Result<bool, ClientError> {
        if self.state.image(id).is_none() {
            return Err(ClientError::UnknownImage(id.clone()));
        }
        self.dispatch(FeedEvent::LikeToggled(id.clone()));

        let liked = self.state.is_liked(id);
        debug!(image = %id, liked, "like toggled");
        Ok(liked)
    }

    /// Returns the new dark-mode flag.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dispatch(FeedEvent::DarkModeToggled);
        self.state.dark_mode
    }
}
