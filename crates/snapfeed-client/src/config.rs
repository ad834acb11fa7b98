//! Client configuration loaded from environment variables.
//!
//! Everything except the access key has a default, so the client can start
//! with a single variable set.

use std::path::PathBuf;
use std::time::Duration;

use snapfeed_net::{RetryPolicy, UnsplashClient};
use snapfeed_shared::constants::{
    CACHE_EXPIRATION_SECS, CACHE_KEY, DEFAULT_API_ROOT, DEFAULT_FETCH_COUNT,
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_FETCH_COUNT, RETRY_BASE_DELAY_MS,
};
use snapfeed_store::Database;

use crate::error::ClientError;
use crate::feed::FeedSettings;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Static client key sent as `client_id`.
    /// Env: `SNAPFEED_ACCESS_KEY`
    /// Default: none (fetching fails until set).
    pub access_key: Option<String>,

    /// Root URL of the photo API.
    /// Env: `SNAPFEED_API_ROOT`
    /// Default: `https://api.unsplash.com`
    pub api_root: String,

    /// SQLite file holding the feed cache.
    /// Env: `SNAPFEED_DB_PATH`
    /// Default: platform data directory.
    pub db_path: Option<PathBuf>,

    /// Storage key of the feed snapshot.
    pub cache_key: String,

    /// How long a feed snapshot stays fresh.
    /// Env: `SNAPFEED_CACHE_TTL_SECS`
    /// Default: 2400
    pub cache_ttl: Duration,

    /// Images requested per feed fetch (1..=30).
    /// Env: `SNAPFEED_FETCH_COUNT`
    /// Default: 10
    pub fetch_count: u32,

    /// Per-request timeout; `0` disables it.
    /// Env: `SNAPFEED_REQUEST_TIMEOUT_SECS`
    /// Default: 30
    pub request_timeout: Option<Duration>,

    /// Extra attempts after a transient network failure.
    /// Env: `SNAPFEED_RETRY_ATTEMPTS`
    /// Default: 0
    pub retry_attempts: u32,

    /// Keep at most this many images in the feed, dropping the oldest.
    /// Env: `SNAPFEED_MAX_IMAGES`
    /// Default: unbounded.
    pub max_images: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            api_root: DEFAULT_API_ROOT.to_string(),
            db_path: None,
            cache_key: CACHE_KEY.to_string(),
            cache_ttl: Duration::from_secs(CACHE_EXPIRATION_SECS),
            fetch_count: DEFAULT_FETCH_COUNT,
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            retry_attempts: 0,
            max_images: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("SNAPFEED_ACCESS_KEY") {
            if !key.trim().is_empty() {
                config.access_key = Some(key.trim().to_string());
            }
        }

        if let Some(root) = lookup("SNAPFEED_API_ROOT") {
            config.api_root = root;
        }

        if let Some(path) = lookup("SNAPFEED_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "SNAPFEED_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(secs);
        }

        if let Some(count) = parse_var::<u32>(&lookup, "SNAPFEED_FETCH_COUNT") {
            if (1..=MAX_FETCH_COUNT).contains(&count) {
                config.fetch_count = count;
            } else {
                tracing::warn!(
                    value = count,
                    max = MAX_FETCH_COUNT,
                    "SNAPFEED_FETCH_COUNT out of range, using default"
                );
            }
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "SNAPFEED_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(n) = parse_var::<u32>(&lookup, "SNAPFEED_RETRY_ATTEMPTS") {
            config.retry_attempts = n;
        }

        if let Some(n) = parse_var::<usize>(&lookup, "SNAPFEED_MAX_IMAGES") {
            config.max_images = (n > 0).then_some(n);
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            cache_key: self.cache_key.clone(),
            cache_ttl: self.cache_ttl,
            fetch_count: self.fetch_count,
            max_images: self.max_images,
        }
    }

    /// Build the HTTP photo source. Fails when no access key is configured.
    pub fn photo_source(&self) -> Result<UnsplashClient, ClientError> {
        self.optional_photo_source()?.ok_or_else(|| {
            ClientError::Config("SNAPFEED_ACCESS_KEY is not set".to_string())
        })
    }

    /// Like [`Self::photo_source`], but a missing key yields `None`; requests
    /// through it then fail only when they are actually made.
    pub fn optional_photo_source(&self) -> Result<Option<UnsplashClient>, ClientError> {
        let Some(key) = self.access_key.as_deref() else {
            return Ok(None);
        };

        let retry = RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(RETRY_BASE_DELAY_MS),
        );
        let client = UnsplashClient::new(&self.api_root, key, self.request_timeout)?;
        Ok(Some(client.with_retry(retry)))
    }

    pub fn open_database(&self) -> Result<Database, ClientError> {
        let db = match &self.db_path {
            Some(path) => Database::open_at(path)?,
            None => Database::new()?,
        };
        Ok(db)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Unparsable value, using default");
            None
        }
    }
}
