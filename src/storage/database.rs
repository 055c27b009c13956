//! SQLite-backed key-value store

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::config::Settings;
use crate::storage::KeyValueStore;
use crate::{Result, StokemeetError};

/// Database wrapper for stokemeet
pub struct Database {
    conn: Mutex<Connection>,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

impl Database {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!("Opened local store at {}", path.display());

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StokemeetError::Other("Local store lock poisoned".to_string()))
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            return Err(StokemeetError::Other(format!(
                "Database schema version {} is newer than supported version {}",
                current_version, CURRENT_SCHEMA_VERSION
            )));
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn()?
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn()?
            .execute_batch(&format!("PRAGMA user_version = {};", version))?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// Number of stored entries
    pub fn entry_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM kv_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()?
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn()?
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT key FROM kv_entries WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;

        let keys = stmt
            .query_map(params![prefix], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_database() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_new_database_sets_schema_version() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let db = Database::open_memory().unwrap();

        db.set("stokemeet_default_profile", "General").unwrap();
        db.set("stokemeet_default_profile", "Retrospective").unwrap();

        assert_eq!(
            db.get("stokemeet_default_profile").unwrap().as_deref(),
            Some("Retrospective")
        );
        assert_eq!(db.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_remove_reports_whether_key_existed() {
        let db = Database::open_memory().unwrap();
        db.set("a", "1").unwrap();

        assert!(db.remove("a").unwrap());
        assert!(!db.remove("a").unwrap());
        assert!(db.get("a").unwrap().is_none());
    }

    #[test]
    fn test_prefix_scan_treats_underscores_literally() {
        let db = Database::open_memory().unwrap();
        db.set("stokemeet_summary_1_General", "{}").unwrap();
        db.set("stokemeet_summary_2_Demo", "{}").unwrap();
        db.set("stokemeetXsummary_3", "{}").unwrap();
        db.set("stokemeet_custom_profiles", "[]").unwrap();

        let keys = db.keys_with_prefix("stokemeet_summary_").unwrap();
        assert_eq!(
            keys,
            vec![
                "stokemeet_summary_1_General".to_string(),
                "stokemeet_summary_2_Demo".to_string()
            ]
        );
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("stokemeet.db");

        {
            let db = Database::open_path(&path).unwrap();
            db.set("key", "value").unwrap();
        }

        let db = Database::open_path(&path).unwrap();
        assert_eq!(db.get("key").unwrap().as_deref(), Some("value"));
        assert_eq!(db.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("future.db");

        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 7;").unwrap();
        drop(conn);

        let err = match Database::open_path(&path) {
            Ok(_) => panic!("expected newer schema to be rejected"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("newer than supported"));
    }
}
