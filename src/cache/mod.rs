pub mod assets;
pub mod manager;

pub use manager::CacheManager;

use std::sync::Arc;

/// Initialize the cache store at the default on-disk location and return a
/// shared handle.
pub async fn init_cache() -> anyhow::Result<Arc<CacheManager>> {
    let cache = CacheManager::new().await?;
    Ok(Arc::new(cache))
}
