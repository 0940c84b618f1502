// Asset bundle cache: point lookup and transactional upsert keyed by
// (chain, address).
use super::CacheManager;
use crate::error::ApiError;
use crate::moralis::AssetBundle;
use rusqlite::{params, OptionalExtension};

impl CacheManager {
    /// Look up the cached bundle for a key. A missing row is not an error:
    /// callers get an empty bundle, indistinguishable from "cached but
    /// empty".
    pub async fn get_assets(&self, chain: &str, address: &str) -> Result<AssetBundle, ApiError> {
        let db = self.db.lock().await;

        let blob: Option<Vec<u8>> = db
            .query_row(
                "SELECT assets FROM assets WHERE chain = ?1 AND address = ?2",
                params![chain, address],
                |row| row.get(0),
            )
            .optional()?;

        match blob {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(AssetBundle::default()),
        }
    }

    /// Replace the cached bundle for a key. The write is a single
    /// transaction; on any error the previous row (if one exists) is left
    /// intact.
    pub async fn put_assets(
        &self,
        chain: &str,
        address: &str,
        bundle: &AssetBundle,
    ) -> Result<(), ApiError> {
        let blob = serde_json::to_vec(bundle)?;

        let mut db = self.db.lock().await;
        let tx = db.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO assets (chain, address, assets, last_updated)
             VALUES (?1, ?2, ?3, strftime('%s', 'now'))",
            params![chain, address, blob],
        )?;

        tx.commit()?;

        Ok(())
    }

    /// Count cached bundles across all keys (health endpoint and tests).
    pub async fn count_bundles(&self) -> Result<usize, ApiError> {
        let db = self.db.lock().await;

        let count: i64 = db.query_row("SELECT COUNT(*) FROM assets", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
