// Moralis deep-index API client for fetching wallet assets
pub mod client;
pub mod types;

pub use client::MoralisClient;
pub use types::{AssetBundle, Nft, NftPage, Token};

#[cfg(test)]
mod tests;
