use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;

impl Database {
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrite `key`. Concurrent writers are not coordinated; the last
    /// write wins.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    /// When `key` was last written, if it exists.
    pub fn item_updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn()
            .query_row(
                "SELECT updated_at FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(raw.and_then(|ts| {
            DateTime::parse_from_rfc3339(&ts)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn missing_key_reads_as_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_item("nope").unwrap(), None);
        assert_eq!(db.item_updated_at("nope").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("k", "first").unwrap();
        db.set_item("k", "second").unwrap();

        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("second"));
        assert!(db.item_updated_at("k").unwrap().is_some());
    }

    #[test]
    fn remove_reports_whether_key_existed() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("k", "v").unwrap();

        assert!(db.remove_item("k").unwrap());
        assert!(!db.remove_item("k").unwrap());
        assert_eq!(db.get_item("k").unwrap(), None);
    }
}
