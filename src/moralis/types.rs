// Moralis API types matching the deep-index v2.2 response shapes
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// ERC20 balance entry from the erc20 endpoint (bare JSON array).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Token {
    pub token_address: String,
    pub symbol: String,
    pub name: String,
    pub logo: Option<String>,
    pub thumbnail: Option<String>,
    pub decimals: u64,
    /// Raw balance as a decimal string; amounts routinely exceed u64.
    pub balance: String,
    #[serde(default)]
    pub possible_spam: bool,
    #[serde(default)]
    pub verified_contract: bool,
}

/// NFT entry from the nft endpoint. Token ids are decimal strings and may
/// exceed native integer range, so they stay strings end to end.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Nft {
    pub token_id: String,
    pub token_address: String,
    pub contract_type: String,
    pub last_metadata_sync: Option<DateTime<Utc>>,
    pub last_token_uri_sync: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub token_hash: Option<String>,
    pub token_uri: Option<String>,
    #[serde(default)]
    pub verified_collection: bool,
    #[serde(default)]
    pub possible_spam: bool,
    pub collection_logo: Option<String>,
    pub collection_banner_image: Option<String>,
}

/// Paginated envelope around NFT results. Upstream also sends status, page
/// and page_size; only the cursor and the result array are consumed, so the
/// rest is left to serde's unknown-field handling.
#[derive(Debug, Clone, Deserialize)]
pub struct NftPage {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub result: Vec<Nft>,
}

/// The combined holdings of one (chain, address) pair. This is both the
/// cached blob and the response body of the assets endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AssetBundle {
    pub tokens: Vec<Token>,
    pub nfts: Vec<Nft>,
}
