use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::data::BiometricRecord;
use crate::error::StoreError;

/// Destination for saved records
///
/// The form only ever inserts; anything that can take a row qualifies.
pub trait RecordStore {
    /// Insert one row and return its row id
    fn insert(&self, record: &BiometricRecord) -> Result<i64, StoreError>;
}

/// SQLite-backed record store.
///
/// Holds only the database location. Every call opens its own connection
/// and lets it drop at the end of the call, so a failing statement still
/// releases the connection.
pub struct SqliteRecordStore {
    db_path: PathBuf,
}

impl SqliteRecordStore {
    /// Create the store and make sure the `users` table exists.
    ///
    /// The parent directory is created if needed.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = SqliteRecordStore { db_path };
        store.init_schema()?;

        Ok(store)
    }

    /// Default database location
    ///
    /// - Linux: ~/.local/share/bio-capture/biometric.db
    /// - macOS: ~/Library/Application Support/bio-capture/biometric.db
    /// - Windows: %APPDATA%\bio-capture\biometric.db
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("bio-capture");
        path.push("biometric.db");
        path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Create the users table if it doesn't exist.
    /// No uniqueness on user_id: saving the same person twice gives two rows.
    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                user_id         TEXT NOT NULL,
                name            TEXT NOT NULL,
                photo           TEXT NOT NULL,
                fingerprint     TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Number of saved records
    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// All saved records in insertion order
    #[cfg(test)]
    pub fn records(&self) -> Result<Vec<BiometricRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, name, photo, fingerprint FROM users ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(BiometricRecord {
                user_id: row.get(0)?,
                name: row.get(1)?,
                photo_path: row.get(2)?,
                fingerprint_path: row.get(3)?,
            })
        })?;

        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }

        Ok(records)
    }
}

impl RecordStore for SqliteRecordStore {
    fn insert(&self, record: &BiometricRecord) -> Result<i64, StoreError> {
        let mut conn = self.connect()?;

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO users (user_id, name, photo, fingerprint) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                &record.user_id,
                &record.name,
                &record.photo_path,
                &record.fingerprint_path,
            ],
        )?;
        let row_id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(row_id)
    }
}

impl std::fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
