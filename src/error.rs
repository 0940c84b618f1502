// Error kinds for the request path. Validation failures carry the offending
// value and map to 400; everything else collapses to a generic 500 so no
// upstream or store detail leaks to callers.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} is not a valid chain name")]
    InvalidChain(String),

    #[error("{0} is not a valid address")]
    InvalidAddress(String),

    /// Upstream unreachable or the transport failed mid-request.
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Upstream body (or a cached blob) was not the JSON we expect.
    #[error("decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cache store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidChain(_) | ApiError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if self.is_client_error() {
            format!("{self}\n")
        } else {
            "Internal Server Error\n".to_string()
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_facing() {
        let err = ApiError::InvalidChain("polygon".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "polygon is not a valid chain name");

        let err = ApiError::InvalidAddress("0x123".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "0x123 is not a valid address");
    }

    #[test]
    fn upstream_errors_collapse_to_500() {
        let err = ApiError::Upstream {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_client_error());
    }
}
