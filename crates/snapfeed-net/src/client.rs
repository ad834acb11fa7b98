//! HTTP implementation of [`PhotoSource`] for the Unsplash API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

use snapfeed_shared::constants::{APP_NAME, MAX_FETCH_COUNT};
use snapfeed_shared::{ImageRecord, UserProfile};

use crate::error::SourceError;
use crate::retry::RetryPolicy;
use crate::schema;
use crate::source::PhotoSource;

/// Photo API client authenticated with a static client key.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    api_root: Url,
    access_key: String,
    retry: RetryPolicy,
}

impl UnsplashClient {
    /// Build a client against `api_root`. `timeout` of `None` leaves
    /// requests unbounded.
    pub fn new(
        api_root: &str,
        access_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SourceError> {
        let api_root = Url::parse(api_root)
            .map_err(|e| SourceError::InvalidRequest(format!("bad API root '{api_root}': {e}")))?;
        if api_root.cannot_be_a_base() {
            return Err(SourceError::InvalidRequest(format!(
                "API root '{api_root}' cannot carry a path"
            )));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        info!(api_root = %api_root, ?timeout, "Photo API client ready");

        Ok(Self {
            http: builder.build()?,
            api_root,
            access_key: access_key.into(),
            retry: RetryPolicy::none(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // `new` rejected cannot-be-a-base roots, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .append_pair("client_id", &self.access_key);
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, SourceError> {
        // Only the path is logged; the query carries the client key.
        let endpoint = url.path().to_string();
        debug!(endpoint = %endpoint, "GET photo API");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                endpoint,
            });
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl PhotoSource for UnsplashClient {
    async fn random_photos(&self, count: u32) -> Result<Vec<ImageRecord>, SourceError> {
        if count == 0 || count > MAX_FETCH_COUNT {
            return Err(SourceError::InvalidRequest(format!(
                "count must be between 1 and {MAX_FETCH_COUNT}, got {count}"
            )));
        }

        let mut url = self.endpoint(&["photos", "random"]);
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());

        let client = self;
        let body = self
            .retry
            .run("random_photos", move || client.get_text(url.clone()))
            .await?;
        let photos = schema::parse_random_photos(&body)?;

        debug!(requested = count, received = photos.len(), "Fetched random photos");
        Ok(photos)
    }

    async fn user_profile(&self, username: &str) -> Result<UserProfile, SourceError> {
        let username = username.trim();
        if username.is_empty() || username.contains('/') {
            return Err(SourceError::InvalidRequest(format!(
                "invalid username '{username}'"
            )));
        }

        let url = self.endpoint(&["users", username]);

        let client = self;
        let body = self
            .retry
            .run("user_profile", move || client.get_text(url.clone()))
            .await?;
        let profile = schema::parse_profile(&body)?;

        debug!(
            username = %profile.username,
            photos = profile.photos.len(),
            "Fetched user profile"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    const KEY: &str = "test-key";

    fn wire_photo(id: usize) -> serde_json::Value {
        json!({
            "id": format!("photo-{id}"),
            "likes": id,
            "user": { "username": format!("user{id}"), "name": "Someone" },
            "location": { "country": null },
            "alt_description": "a photo",
            "urls": {
                "raw": "https://img.test/raw",
                "full": "https://img.test/full",
                "regular": "https://img.test/regular",
                "small": "https://img.test/small",
                "thumb": "https://img.test/thumb"
            }
        })
    }

    async fn random(Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
        if q.get("client_id").map(String::as_str) != Some(KEY) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "errors": ["OAuth error"] })));
        }
        let count: usize = q.get("count").and_then(|c| c.parse().ok()).unwrap_or(1);
        let photos: Vec<_> = (0..count).map(wire_photo).collect();
        (StatusCode::OK, Json(json!(photos)))
    }

    async fn user(
        Path(username): Path<String>,
        Query(q): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        if q.get("client_id").map(String::as_str) != Some(KEY) {
            return (StatusCode::UNAUTHORIZED, Json(json!({})));
        }
        if username != "jane" {
            return (StatusCode::NOT_FOUND, Json(json!({ "errors": ["Couldn't find User"] })));
        }
        (
            StatusCode::OK,
            Json(json!({
                "username": "jane",
                "first_name": "Jane",
                "last_name": null,
                "bio": "Takes pictures",
                "followers_count": 10,
                "following_count": 2,
                "profile_image": { "large": "https://img.test/jane" },
                "photos": [{
                    "id": "p1",
                    "slug": "first",
                    "created_at": "2021-06-01T10:00:00Z",
                    "urls": {
                        "raw": "r", "full": "f", "regular": "g", "small": "s", "thumb": "t"
                    }
                }]
            })),
        )
    }

    async fn spawn_api() -> String {
        let router = Router::new()
            .route("/photos/random", get(random))
            .route("/users/:username", get(user))
            .route("/broken/photos/random", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(root: &str, key: &str) -> UnsplashClient {
        UnsplashClient::new(root, key, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn fetches_requested_number_of_photos() {
        let root = spawn_api().await;
        let photos = client(&root, KEY).random_photos(10).await.unwrap();

        assert_eq!(photos.len(), 10);
        assert_eq!(photos[3].id.as_str(), "photo-3");
        assert_eq!(photos[3].likes, 3);
    }

    #[tokio::test]
    async fn wrong_key_surfaces_status_error() {
        let root = spawn_api().await;
        let err = client(&root, "nope").random_photos(1).await.unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let root = spawn_api().await;
        let err = client(&format!("{root}/broken"), KEY)
            .random_photos(1)
            .await
            .unwrap_err();

        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn fetches_profile_with_photos() {
        let root = spawn_api().await;
        let profile = client(&root, KEY).user_profile("jane").await.unwrap();

        assert_eq!(profile.username, "jane");
        assert_eq!(profile.display_name(), "Jane");
        assert_eq!(profile.photos.len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let root = spawn_api().await;
        let err = client(&root, KEY).user_profile("ghost").await.unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn rejects_out_of_range_counts_without_a_request() {
        let c = client("http://127.0.0.1:9", KEY);
        assert!(matches!(
            c.random_photos(0).await,
            Err(SourceError::InvalidRequest(_))
        ));
        assert!(matches!(
            c.random_photos(MAX_FETCH_COUNT + 1).await,
            Err(SourceError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let err = client("http://127.0.0.1:9", KEY)
            .random_photos(1)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn endpoint_keeps_root_path_and_adds_key() {
        let c = client("https://api.example.com/v1/", KEY);
        let url = c.endpoint(&["users", "jane doe"]);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/users/jane%20doe?client_id=test-key"
        );
    }

    #[test]
    fn rejects_unparsable_root() {
        assert!(UnsplashClient::new("not a url", KEY, None).is_err());
    }
}
