// Moralis deep-index client - https://deep-index.moralis.io/api/v2.2
use super::types::{Nft, NftPage, Token};
use crate::error::ApiError;
use anyhow::{anyhow, Result};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{info, warn};

const MORALIS_API_URL: &str = "https://deep-index.moralis.io/api/v2.2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on cursor pages followed per NFT fetch. Keeps a buggy or
/// hostile upstream from looping us forever; hitting it logs a warning and
/// returns what was collected so far.
pub(crate) const MAX_NFT_PAGES: usize = 25;

/// Moralis API client. Stateless request/response: holds only the reqwest
/// client and the credential.
pub struct MoralisClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MoralisClient {
    /// Create a client against the production API with the required API key.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(MORALIS_API_URL.to_string(), api_key)
    }

    /// Create a client against an arbitrary base URL (used by tests to point
    /// at a mock server).
    pub fn with_base_url(base_url: String, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key.ok_or_else(|| anyhow!("Moralis API key is required"))?;

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("asset-api/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Fetch all ERC20 balances for an address. Spam exclusion is disabled
    /// on purpose: the spam flag is passed through to callers, not filtered.
    pub async fn fetch_tokens(&self, chain: &str, address: &str) -> Result<Vec<Token>, ApiError> {
        let url = format!("{}/{}/erc20", self.base_url, address);
        info!(chain, address, "fetch tokens");

        let response = self
            .client
            .get(&url)
            .query(&[("chain", chain), ("exclude_spam", "false")])
            .header("Accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let body = Self::read_success_body(response).await?;
        let tokens: Vec<Token> = serde_json::from_str(&body)?;
        Ok(tokens)
    }

    /// Fetch all NFTs for an address, following the page cursor until the
    /// upstream stops returning one (or the page cap is hit).
    pub async fn fetch_nfts(&self, chain: &str, address: &str) -> Result<Vec<Nft>, ApiError> {
        let url = format!("{}/{}/nft", self.base_url, address);
        info!(chain, address, "fetch nfts");

        let mut nfts = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 0..MAX_NFT_PAGES {
            let mut request = self
                .client
                .get(&url)
                .query(&[
                    ("format", "decimal"),
                    ("chain", chain),
                    ("exclude_spam", "false"),
                ])
                .header("Accept", "application/json")
                .header("X-API-Key", &self.api_key);

            if let Some(cursor) = &cursor {
                request = request.query(&[("cursor", cursor.as_str())]);
            }

            let response = request.send().await?;
            let body = Self::read_success_body(response).await?;
            let envelope: NftPage = serde_json::from_str(&body)?;

            nfts.extend(envelope.result);

            match envelope.cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => return Ok(nfts),
            }

            if page + 1 == MAX_NFT_PAGES {
                warn!(
                    chain,
                    address,
                    pages = MAX_NFT_PAGES,
                    "nft pagination cap reached, result is truncated"
                );
            }
        }

        Ok(nfts)
    }

    /// Map a non-success status to an upstream error, otherwise hand back the
    /// body text for decoding. Decoding from text keeps transport failures
    /// (`Network`) distinguishable from malformed JSON (`Decode`).
    async fn read_success_body(response: Response) -> Result<String, ApiError> {
        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::UNAUTHORIZED => Err(ApiError::Upstream {
                status: 401,
                message: "Unauthorized - check API key".to_string(),
            }),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(ApiError::Upstream {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
