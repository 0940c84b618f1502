use anyhow::{anyhow, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Thread-safe cache store over SQLite.
pub struct CacheManager {
    pub(crate) db: Arc<Mutex<Connection>>,
}

impl CacheManager {
    /// Open the cache at the default location under the home directory.
    pub async fn new() -> Result<Self> {
        let db_path = Self::default_db_path()?;
        Self::open(&db_path).await
    }

    /// Open the cache at an explicit path.
    pub async fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // WAL mode for better concurrency between readers and the refresh
        // writer.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::apply_migrations(&conn)?;

        info!(path = %db_path.display(), "cache store ready");

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory cache for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::apply_migrations(&conn)?;

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;

        let db_dir = home_dir.join(".asset-api");
        std::fs::create_dir_all(&db_dir)?;

        Ok(db_dir.join("assets.db"))
    }

    /// One row per (chain, address); refreshes replace the previous bundle
    /// rather than accumulating rows.
    fn apply_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS assets (
                chain TEXT NOT NULL,
                address TEXT NOT NULL,
                assets BLOB NOT NULL,
                last_updated INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
                PRIMARY KEY (chain, address)
            );",
        )?;

        Ok(())
    }
}
