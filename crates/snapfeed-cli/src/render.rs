//! Plain-text rendering of feed and profile state.

use chrono::{DateTime, Utc};

use snapfeed_client::{FeedState, LoadStatus, ProfileState, Route, ViewMode};
use snapfeed_store::CacheSnapshot;

const GRID_COLUMNS: usize = 3;

/// Joins rendered lines, each terminated by a newline.
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn heading(title: &str, subtitle: &str, dark: bool) -> Vec<String> {
    let title = if dark {
        // Reverse video stands in for the dark palette.
        format!("\x1b[7m {title} \x1b[0m")
    } else {
        title.to_string()
    };
    vec![title, subtitle.to_string(), String::new()]
}

pub fn feed(state: &FeedState) -> String {
    let mut lines = heading(
        "FEEDS",
        "Infinite scrolling feed from the Unsplash API",
        state.dark_mode,
    );

    if let Some(err) = &state.last_error {
        lines.push(format!("! last fetch failed: {err}"));
        lines.push(String::new());
    }

    if state.images.is_empty() {
        lines.push("Loading...".to_string());
        return finish(lines);
    }

    for image in &state.images {
        let heart = if state.is_liked(&image.id) { "♥" } else { "♡" };
        lines.push(match &image.user.name {
            Some(name) => format!("@{} ({name})  [{}]", image.user.username, image.id),
            None => format!("@{}  [{}]", image.user.username, image.id),
        });
        lines.push(format!(
            "  Location: {}",
            image.location.as_deref().unwrap_or("unknown")
        ));
        lines.push(format!("  Thumb: {}", image.urls.thumb));
        lines.push(format!(
            "  Resolutions: raw {} | full {} | regular {}",
            image.urls.raw, image.urls.full, image.urls.regular
        ));
        lines.push(format!("  {heart} Likes: {}", image.likes));
        if let Some(about) = &image.alt_description {
            lines.push(format!("  About: {about}"));
        }
        if let Some(route) = Route::for_author(image) {
            lines.push(format!("  Profile: {route}"));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "{} images, {} liked",
        state.images.len(),
        state.liked.len()
    ));
    finish(lines)
}

pub fn profile(state: &ProfileState) -> String {
    let Some(profile) = &state.profile else {
        return match &state.status {
            LoadStatus::Failed(err) => format!("Loading... (request failed: {err})\n"),
            _ => "Loading...\n".to_string(),
        };
    };

    let mut lines = heading(
        "User Profile",
        "Infinite scrolling feed from the Unsplash API",
        state.dark_mode,
    );
    lines.push(profile.display_name());
    lines.push(format!("@{}", profile.username));
    lines.push(format!("Avatar: {}", profile.profile_image));
    if let Some(bio) = &profile.bio {
        lines.push(format!("Bio: {bio}"));
    }
    lines.push(format!(
        "Followers: {}    Following: {}",
        profile.followers_count, profile.following_count
    ));
    lines.push(String::new());

    match state.view_mode {
        ViewMode::Grid => {
            for row in state.photos.chunks(GRID_COLUMNS) {
                let cells: Vec<String> = row.iter().map(|p| format!("{:<24}", p.id)).collect();
                lines.push(cells.join(" ").trim_end().to_string());
            }
        }
        ViewMode::List => {
            for photo in &state.photos {
                lines.push(photo.id.to_string());
                lines.push(format!("  Thumb: {}", photo.urls.thumb));
                lines.push(format!(
                    "  Resolution: full {} | raw {} | regular {}",
                    photo.urls.full, photo.urls.raw, photo.urls.regular
                ));
                lines.push(format!("  Uploaded on: {}", photo.created_at.to_rfc3339()));
                if let Some(slug) = &photo.slug {
                    lines.push(format!("  {slug}"));
                }
            }
        }
    }

    finish(lines)
}

pub fn cache(key: &str, snapshot: Option<&CacheSnapshot>, fresh: bool, now: DateTime<Utc>) -> String {
    let Some(snapshot) = snapshot else {
        return format!("No snapshot under '{key}'\n");
    };

    let taken = snapshot
        .taken_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| snapshot.timestamp.to_string());
    format!(
        "Snapshot '{key}': {} images, taken {taken} ({}s ago), {}\n",
        snapshot.images.len(),
        snapshot.age_at(now).as_secs(),
        if fresh { "fresh" } else { "stale" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapfeed_client::{FeedEvent, ProfileEvent};
    use snapfeed_shared::{ImageId, ImageRecord, ImageUrls, ProfilePhoto, UserProfile, UserRef};

    fn image(id: &str) -> ImageRecord {
        ImageRecord {
            id: ImageId::new(id),
            user: UserRef {
                username: "jane".into(),
                name: Some("Jane".into()),
            },
            urls: ImageUrls::default(),
            likes: 2,
            location: Some("Norway".into()),
            alt_description: Some("fjord".into()),
            description: None,
            created_at: None,
            comments: Vec::new(),
        }
    }

    fn loaded_profile() -> ProfileState {
        let photos = ["a", "b", "c", "d"]
            .iter()
            .map(|id| ProfilePhoto {
                id: ImageId::new(*id),
                slug: Some(format!("{id}-slug")),
                created_at: Utc::now(),
                urls: ImageUrls::default(),
            })
            .collect();
        ProfileState::default()
            .apply(ProfileEvent::LoadStarted("jane".into()))
            .apply(ProfileEvent::Loaded(UserProfile {
                username: "jane".into(),
                first_name: "Jane".into(),
                last_name: Some("Doe".into()),
                bio: None,
                followers_count: 1,
                following_count: 2,
                profile_image: "avatar".into(),
                photos,
            }))
    }

    #[test]
    fn empty_feed_shows_loading() {
        assert!(feed(&FeedState::default()).contains("Loading..."));
    }

    #[test]
    fn feed_marks_liked_images_and_links_author() {
        let state = FeedState::default()
            .apply(FeedEvent::ImagesFetched(vec![image("x")]))
            .apply(FeedEvent::LikeToggled(ImageId::new("x")));
        let text = feed(&state);

        assert!(text.contains("♥ Likes: 3"));
        assert!(text.contains("Location: Norway"));
        assert!(text.contains("Profile: /profile/jane"));
        assert!(text.contains("1 images, 1 liked"));
    }

    #[test]
    fn grid_and_list_layouts_differ() {
        let grid = profile(&loaded_profile());
        let list = profile(&loaded_profile().apply(ProfileEvent::ViewToggled));

        assert!(grid.contains("Jane Doe"));
        assert!(!grid.contains("Uploaded on"));
        assert!(list.contains("Uploaded on"));
        assert!(list.contains("a-slug"));
    }

    #[test]
    fn failed_profile_stays_loading() {
        let state = ProfileState::default()
            .apply(ProfileEvent::LoadStarted("jane".into()))
            .apply(ProfileEvent::LoadFailed("503".into()));
        assert!(profile(&state).starts_with("Loading..."));
    }

    #[test]
    fn author_with_slash_gets_no_profile_link() {
        let mut img = image("x");
        img.user.username = "ja/ne".into();
        let state = FeedState::default().apply(FeedEvent::ImagesFetched(vec![img]));
        let text = feed(&state);

        assert!(text.contains("@ja/ne"));
        assert!(!text.contains("Profile:"));
    }

    #[test]
    fn output_ends_with_single_newline() {
        let text = feed(&FeedState::default());
        assert!(text.ends_with("Loading...\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn dark_mode_uses_reverse_video() {
        let state = FeedState::default().apply(FeedEvent::DarkModeToggled);
        assert!(feed(&state).starts_with("\x1b[7m"));
    }
}
