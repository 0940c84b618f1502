pub mod cache;
pub mod config;
pub mod error;
pub mod moralis;
pub mod refresh;
pub mod server;
pub mod validation;

pub use cache::CacheManager;
pub use error::ApiError;
pub use moralis::MoralisClient;
