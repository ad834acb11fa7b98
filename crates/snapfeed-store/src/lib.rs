//! # snapfeed-store
//!
//! Durable local storage for snapfeed, backed by SQLite.
//!
//! Storage is a flat key/value table, the same model as browser local
//! storage: one key per entry, values are opaque strings, the last writer
//! wins. The feed cache snapshot is stored as JSON under a single key.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod snapshot;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use snapshot::CacheSnapshot;
