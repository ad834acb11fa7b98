/// Application name
pub const APP_NAME: &str = "snapfeed";

/// Default root of the remote photo API
pub const DEFAULT_API_ROOT: &str = "https://api.unsplash.com";

/// Local storage key holding the feed snapshot
pub const CACHE_KEY: &str = "unsplashImages";

/// Snapshot freshness window in seconds (40 minutes)
pub const CACHE_EXPIRATION_SECS: u64 = 2400;

/// Images requested per feed fetch
pub const DEFAULT_FETCH_COUNT: u32 = 10;

/// Upper bound the photo API accepts for `count`
pub const MAX_FETCH_COUNT: u32 = 30;

/// HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Base delay for retry backoff in milliseconds
pub const RETRY_BASE_DELAY_MS: u64 = 250;
