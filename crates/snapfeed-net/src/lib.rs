// Remote photo source: HTTP client, wire schema and retry policy.

pub mod client;
pub mod error;
pub mod retry;
pub mod schema;
pub mod source;

pub use client::UnsplashClient;
pub use error::SourceError;
pub use retry::RetryPolicy;
pub use source::PhotoSource;
