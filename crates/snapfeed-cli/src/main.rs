//! # snapfeed
//!
//! Terminal front end for the snapfeed client.
//!
//! - **feed**: restore the feed from a fresh cache or fetch a first batch,
//!   optionally scroll further and like images
//! - **profile**: show a user's profile in grid or list layout
//! - **open**: follow a route such as `/profile/<username>`
//! - **cache**: inspect or clear the cached feed snapshot

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use snapfeed_client::{ClientConfig, FeedController, ProfileLoader, Route};
use snapfeed_shared::ImageId;

#[derive(Parser)]
#[command(name = "snapfeed")]
#[command(about = "Infinite random photo feed backed by the Unsplash API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite file holding the feed cache
    #[arg(long, global = true, env = "SNAPFEED_DB_PATH")]
    db: Option<PathBuf>,

    /// Render with the dark palette
    #[arg(long, global = true)]
    dark: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the feed, restoring it from cache when fresh
    Feed {
        /// Number of extra batches to fetch after initializing
        #[arg(long, default_value_t = 0)]
        more: u32,

        /// Images per extra batch (defaults to SNAPFEED_FETCH_COUNT)
        #[arg(long)]
        count: Option<u32>,

        /// Toggle the like on an image id (repeatable)
        #[arg(long = "like")]
        likes: Vec<String>,
    },
    /// Show a user's profile
    Profile {
        username: String,

        /// Use the list layout instead of the grid
        #[arg(long)]
        list: bool,
    },
    /// Navigate to a route, e.g. `/` or `/profile/<username>`
    Open { route: Route },
    /// Inspect or clear the cached feed snapshot
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print snapshot age and size
    Show,
    /// Delete the snapshot
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    snapfeed_client::init_tracing("warn,snapfeed_client=info,snapfeed_net=info");

    let mut config = ClientConfig::from_env();
    if let Some(db) = cli.db.clone() {
        config.db_path = Some(db);
    }
    info!(
        api_root = %config.api_root,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        fetch_count = config.fetch_count,
        key_configured = config.access_key.is_some(),
        "Loaded configuration"
    );

    match cli.command {
        Commands::Feed { more, count, likes } => {
            run_feed(&config, more, count, &likes, cli.dark).await
        }
        Commands::Profile { username, list } => {
            run_profile(&config, &username, list, cli.dark).await
        }
        Commands::Open { route } => match route {
            Route::Feed => run_feed(&config, 0, None, &[], cli.dark).await,
            Route::Profile { username } => run_profile(&config, &username, false, cli.dark).await,
        },
        Commands::Cache { action } => run_cache(&config, action),
    }
}

async fn run_feed(
    config: &ClientConfig,
    more: u32,
    count: Option<u32>,
    likes: &[String],
    dark: bool,
) -> Result<()> {
    // A fresh snapshot can be shown without an access key.
    let source = config.optional_photo_source()?;
    let db = config.open_database().context("failed to open feed cache")?;
    let mut feed = FeedController::new(source, db, config.feed_settings());

    // Fetch errors are already logged and recorded in the feed state.
    match feed.initialize().await {
        Ok(_) => {}
        Err(e) if e.is_missing_credentials() => {
            return Err(e).context("no fresh cached feed; set SNAPFEED_ACCESS_KEY");
        }
        Err(e) => warn!(error = %e, "feed started empty"),
    }

    let count = count.unwrap_or(config.fetch_count);
    for _ in 0..more {
        if feed.fetch_more(count).await.is_err() {
            break;
        }
    }

    for id in likes {
        if let Err(e) = feed.toggle_like(&ImageId::new(id.as_str())) {
            warn!(error = %e, "like ignored");
        }
    }

    if dark {
        feed.toggle_dark_mode();
    }

    print!("{}", render::feed(feed.state()));
    Ok(())
}

async fn run_profile(config: &ClientConfig, username: &str, list: bool, dark: bool) -> Result<()> {
    let mut loader = ProfileLoader::new(config.photo_source()?);

    if let Err(e) = loader.load(username).await {
        warn!(username, error = %e, "profile unavailable");
    }
    if list {
        loader.toggle_view();
    }
    if dark {
        loader.toggle_dark_mode();
    }

    print!("{}", render::profile(loader.state()));
    Ok(())
}

fn run_cache(config: &ClientConfig, action: CacheAction) -> Result<()> {
    let db = config.open_database().context("failed to open feed cache")?;

    match action {
        CacheAction::Show => {
            let now = Utc::now();
            let snapshot = db.load_snapshot(&config.cache_key)?;
            let fresh = snapshot
                .as_ref()
                .is_some_and(|s| s.is_fresh_at(now, config.cache_ttl));
            print!(
                "{}",
                render::cache(&config.cache_key, snapshot.as_ref(), fresh, now)
            );
        }
        CacheAction::Clear => {
            if db.remove_item(&config.cache_key)? {
                println!("Cleared snapshot '{}'", config.cache_key);
            } else {
                println!("No snapshot under '{}'", config.cache_key);
            }
        }
    }

    Ok(())
}
