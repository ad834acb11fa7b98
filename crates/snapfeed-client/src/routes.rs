//! Navigation between the feed and profile views.

use std::fmt;
use std::str::FromStr;

use snapfeed_shared::ImageRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Feed,
    /// `/profile/<username>`
    Profile { username: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown route: {0}")]
pub struct RouteError(pub String);

impl Route {
    /// Link from an image to the profile of the user who posted it, or
    /// `None` when the username cannot be expressed as a path segment.
    pub fn for_author(image: &ImageRecord) -> Option<Self> {
        let username = &image.user.username;
        is_path_segment(username).then(|| Route::Profile {
            username: username.clone(),
        })
    }
}

/// Non-empty, no `/`, no surrounding whitespace.
fn is_path_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains('/') && s.trim() == s
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Feed);
        }

        match trimmed.strip_prefix("/profile/") {
            Some(username) if is_path_segment(username) => {
                Ok(Route::Profile {
                    username: username.to_string(),
                })
            }
            _ => Err(RouteError(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Feed => f.write_str("/"),
            Route::Profile { username } => write!(f, "/profile/{username}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::image;

    #[test]
    fn parses_known_routes() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Feed);
        assert_eq!("".parse::<Route>().unwrap(), Route::Feed);
        assert_eq!(
            "/profile/jane/".parse::<Route>().unwrap(),
            Route::Profile {
                username: "jane".into()
            }
        );
    }

    #[test]
    fn rejects_malformed_profile_paths() {
        assert!("/profile/".parse::<Route>().is_err());
        assert!("/profile/a/b".parse::<Route>().is_err());
        assert!("/settings".parse::<Route>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let route = Route::Profile {
            username: "jane".into(),
        };
        assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        assert_eq!(Route::Feed.to_string(), "/");
    }

    #[test]
    fn author_link_uses_username() {
        let img = image("a", 0);
        let route = Route::for_author(&img).unwrap();
        assert_eq!(route.to_string(), "/profile/a-owner");
        assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
    }

    #[test]
    fn author_without_valid_path_segment_has_no_link() {
        for username in ["jane/doe", "", " jane"] {
            let mut img = image("a", 0);
            img.user.username = username.to_string();
            assert_eq!(Route::for_author(&img), None, "{username:?}");
        }
    }
}
