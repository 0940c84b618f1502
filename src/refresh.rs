// Refresh workflow: re-fetch assets from the upstream indexer and persist
// them as one cache row.
use crate::cache::CacheManager;
use crate::error::ApiError;
use crate::moralis::{AssetBundle, MoralisClient};
use tracing::info;

/// Fetch NFTs then tokens (fixed order, both must succeed), combine, and
/// replace the cached bundle for the key. Fetches complete before the write
/// transaction opens, so a fetch failure leaves the cache untouched and no
/// lock is held across network I/O.
pub async fn refresh_assets(
    client: &MoralisClient,
    cache: &CacheManager,
    chain: &str,
    address: &str,
) -> Result<(), ApiError> {
    let nfts = client.fetch_nfts(chain, address).await?;
    let tokens = client.fetch_tokens(chain, address).await?;

    let bundle = AssetBundle { tokens, nfts };

    cache.put_assets(chain, address, &bundle).await?;

    info!(
        chain,
        address,
        tokens = bundle.tokens.len(),
        nfts = bundle.nfts.len(),
        "assets refreshed"
    );

    Ok(())
}
