//! Profile loader: one user's metadata and photos, fetched once per view.

use tracing::{debug, error, info};

use snapfeed_net::PhotoSource;
use snapfeed_shared::{ProfilePhoto, UserProfile};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileState {
    /// Username the view is showing, once one has been requested.
    pub username: Option<String>,
    pub status: LoadStatus,
    pub profile: Option<UserProfile>,
    /// Photos accumulated from every successful load for `username`.
    pub photos: Vec<ProfilePhoto>,
    pub view_mode: ViewMode,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    LoadStarted(String),
    Loaded(UserProfile),
    LoadFailed(String),
    ViewToggled,
    DarkModeToggled,
}

impl ProfileState {
    pub fn apply(mut self, event: ProfileEvent) -> Self {
        match event {
            ProfileEvent::LoadStarted(username) => {
                // A different user means a different view; start empty.
                if self.username.as_deref() != Some(username.as_str()) {
                    self.profile = None;
                    self.photos.clear();
                    self.username = Some(username);
                }
                self.status = LoadStatus::Loading;
            }
            ProfileEvent::Loaded(profile) => {
                self.photos.extend(profile.photos.iter().cloned());
                self.profile = Some(profile);
                self.status = LoadStatus::Loaded;
            }
            ProfileEvent::LoadFailed(message) => {
                self.status = LoadStatus::Failed(message);
            }
            ProfileEvent::ViewToggled => {
                self.view_mode = self.view_mode.toggled();
            }
            ProfileEvent::DarkModeToggled => {
                self.dark_mode = !self.dark_mode;
            }
        }
        self
    }

    /// True until a profile has arrived.
    pub fn is_loading(&self) -> bool {
        self.profile.is_none()
    }
}

pub struct ProfileLoader<S> {
    source: S,
    state: ProfileState,
}

impl<S: PhotoSource> ProfileLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ProfileState::default(),
        }
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    fn dispatch(&mut self, event: ProfileEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    /// Fetch `username`'s profile. Does nothing if that profile is already
    /// loaded.
    pub async fn load(&mut self, username: &str) -> Result<(), ClientError> {
        let username = username.trim();
        if self.state.username.as_deref() == Some(username)
            && self.state.status == LoadStatus::Loaded
        {
            debug!(username, "profile already loaded");
            return Ok(());
        }

        self.dispatch(ProfileEvent::LoadStarted(username.to_string()));

        match self.source.user_profile(username).await {
            Ok(profile) => {
                info!(username, photos = profile.photos.len(), "profile loaded");
                self.dispatch(ProfileEvent::Loaded(profile));
                Ok(())
            }
            Err(e) => {
                error!(username, error = %e, "failed to load profile");
                self.dispatch(ProfileEvent::LoadFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Switch between grid and list display. Never refetches.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.dispatch(ProfileEvent::ViewToggled);
        self.state.view_mode
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dispatch(ProfileEvent::DarkModeToggled);
        self.state.dark_mode
    }
}
