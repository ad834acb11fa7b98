//! Timestamped feed snapshot persisted under a single storage key.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use snapfeed_shared::ImageRecord;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// A copy of the feed as it was at `timestamp` (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub timestamp: i64,
    pub images: Vec<ImageRecord>,
}

impl CacheSnapshot {
    pub fn new(images: Vec<ImageRecord>, taken_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: taken_at.timestamp_millis(),
            images,
        }
    }

    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// Time elapsed between the snapshot and `now`. A snapshot stamped in
    /// the future has age zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        let millis = now.timestamp_millis().saturating_sub(self.timestamp);
        Duration::from_millis(u64::try_from(millis).unwrap_or(0))
    }

    /// Fresh iff `now - timestamp < window`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age_at(now) < window
    }
}

impl Database {
    pub fn load_snapshot(&self, key: &str) -> Result<Option<CacheSnapshot>> {
        let Some(json) = self.get_item(key)? else {
            debug!(key, "no cached snapshot");
            return Ok(None);
        };

        let snapshot: CacheSnapshot =
            serde_json::from_str(&json).map_err(|source| StoreError::CorruptSnapshot {
                key: key.to_string(),
                source,
            })?;

        debug!(key, images = snapshot.images.len(), "loaded cached snapshot");
        Ok(Some(snapshot))
    }

    pub fn save_snapshot(&self, key: &str, snapshot: &CacheSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.set_item(key, &json)?;
        debug!(key, images = snapshot.images.len(), bytes = json.len(), "saved snapshot");
        Ok(())
    }
}
