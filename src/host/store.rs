use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;
use thiserror::Error;

use crate::state::data::{assets_from_json, assets_to_json, Asset, InstallationParameters};

/// Errors from the host store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("could not create the application data directory: {0}")]
    DataDir(#[from] std::io::Error),
}

/// The HostStore persists what the host platform owns: the app-wide
/// installation parameters and the value of each asset field.
///
/// Installation parameters live in a single-row table written only by
/// the configuration screen's save hook. Field values are stored as
/// JSON under the field's id; a field with no assets has no row at all
/// (`None` is the canonical empty value and never hits the database as
/// an empty array).
pub struct HostStore {
    conn: Connection,
    db_path: PathBuf,
}

impl HostStore {
    /// Open the store, creating the database on first run.
    ///
    /// The database file lives in the user's data directory:
    /// - Linux: ~/.local/share/aem-asset-picker/asset_picker.db
    /// - macOS: ~/Library/Application Support/aem-asset-picker/asset_picker.db
    /// - Windows: %APPDATA%\aem-asset-picker\asset_picker.db
    pub fn new() -> Result<Self, StoreError> {
        let db_path = Self::db_path();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;

        println!("📁 Host store initialized at: {}", db_path.display());

        let store = HostStore { conn, db_path };
        store.init_schema()?;
        Ok(store)
    }

    /// An in-memory store for tests - same schema, no file on disk.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = HostStore {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Where the database file should live
    fn db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("aem-asset-picker");
        path.push("asset_picker.db");
        path
    }

    /// Create all tables if they don't exist. Safe to run every start.
    fn init_schema(&self) -> Result<(), StoreError> {
        // Single-row table for the app installation parameters
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS parameters (
                id              INTEGER PRIMARY KEY CHECK (id = 1),
                config_domain   TEXT NOT NULL,
                root_path       TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;

        // One row per field that currently has assets attached
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS field_values (
                field_id        TEXT PRIMARY KEY,
                value_json      TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Read the installation parameters.
    /// Returns `None` while the app has never been configured.
    pub fn parameters(&self) -> Result<Option<InstallationParameters>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT config_domain, root_path FROM parameters WHERE id = 1",
                [],
                |row| {
                    Ok(InstallationParameters {
                        config_domain: row.get(0)?,
                        root_path: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Persist the installation parameters (the save hook's write).
    pub fn set_parameters(&self, parameters: &InstallationParameters) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO parameters (id, config_domain, root_path, updated_at)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                config_domain = excluded.config_domain,
                root_path = excluded.root_path,
                updated_at = excluded.updated_at",
            rusqlite::params![
                &parameters.config_domain,
                &parameters.root_path,
                Utc::now().timestamp(),
            ],
        )?;
        Ok(())
    }

    /// Read one field's asset list. `None` means the field is empty.
    pub fn field_value(&self, field_id: &str) -> Result<Option<Vec<Asset>>, StoreError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value_json FROM field_values WHERE field_id = ?1",
                [field_id],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(assets_from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Write one field's asset list. `None` deletes the stored value.
    pub fn set_field_value(
        &self,
        field_id: &str,
        assets: Option<&[Asset]>,
    ) -> Result<(), StoreError> {
        match assets {
            Some(assets) => {
                let json = assets_to_json(assets)?;
                self.conn.execute(
                    "INSERT INTO field_values (field_id, value_json, updated_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(field_id) DO UPDATE SET
                        value_json = excluded.value_json,
                        updated_at = excluded.updated_at",
                    rusqlite::params![field_id, &json, Utc::now().timestamp()],
                )?;
            }
            None => {
                self.conn.execute(
                    "DELETE FROM field_values WHERE field_id = ?1",
                    [field_id],
                )?;
            }
        }
        Ok(())
    }
}

// Implement Debug without dumping the connection
impl std::fmt::Debug for HostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
