pub mod config;
pub mod error;
pub mod feed;
pub mod profile;
pub mod routes;

#[cfg(test)]
pub(crate) mod testing;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::ClientError;
pub use feed::{FeedController, FeedEvent, FeedSettings, FeedState, InitOutcome};
pub use profile::{LoadStatus, ProfileEvent, ProfileLoader, ProfileState, ViewMode};
pub use routes::Route;

/// Install the global tracing subscriber. `RUST_LOG` wins over
/// `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_filter)
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
