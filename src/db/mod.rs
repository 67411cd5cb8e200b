mod bills;
mod cycles;
mod migrate;
mod predictions;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// SQLite handle. Opened per command and passed by reference.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            if !path.exists() {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .mode(0o600)
                    .open(&path)?;
            } else {
                let mut perms = fs::metadata(&path)?.permissions();
                if perms.mode() & 0o777 != 0o600 {
                    perms.set_mode(0o600);
                    fs::set_permissions(&path, perms)?;
                }
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        debug!(path = %path.display(), "opened database");
        let db = Self { conn };
        migrate::run(&db.conn)?;
        Ok(db)
    }
}

/// List columns are stored as JSON arrays.
pub(crate) fn encode_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

pub(crate) fn decode_list(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}
