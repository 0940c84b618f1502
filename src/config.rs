use std::env;
use std::fs;
use std::path::PathBuf;

/// File checked for the Moralis credential when the environment variable is
/// unset.
const API_TOKEN_FILE: &str = "moralis_api_token";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening address for the API server.
    pub api_addr: String,
    /// Moralis API credential, from `MORALIS_API_TOKEN` or the token file.
    pub moralis_api_token: Option<String>,
    /// Override for the cache database location; the default lives under the
    /// home directory.
    pub db_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_addr: env::var("API_ADDR").unwrap_or_else(|_| "0.0.0.0:10000".into()),
            moralis_api_token: moralis_api_token(),
            db_path: env::var("ASSET_DB_PATH").ok().map(PathBuf::from),
        }
    }
}

fn moralis_api_token() -> Option<String> {
    if let Ok(token) = env::var("MORALIS_API_TOKEN") {
        return Some(token);
    }

    fs::read_to_string(API_TOKEN_FILE)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
