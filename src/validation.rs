// Input validation for path parameters. Validators are pure: they return a
// typed error and never touch the response; the handler layer decides how to
// report failures.
use crate::error::ApiError;

/// Chains the upstream indexer is queried for. Anything else is rejected
/// before any I/O happens.
pub const SUPPORTED_CHAINS: &[&str] = &["eth", "sepolia"];

pub fn validate_chain(chain: &str) -> Result<(), ApiError> {
    if SUPPORTED_CHAINS.contains(&chain) {
        Ok(())
    } else {
        Err(ApiError::InvalidChain(chain.to_string()))
    }
}

/// An address is "0x" followed by a non-empty, even-length hex string.
/// Odd nibble counts show up in the wild (truncated copy-paste) and must
/// be rejected.
pub fn validate_address(address: &str) -> Result<(), ApiError> {
    match address.strip_prefix("0x") {
        Some(hex) if is_hex(hex) => Ok(()),
        _ => Err(ApiError::InvalidAddress(address.to_string())),
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
