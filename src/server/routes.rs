use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::moralis::AssetBundle;
use crate::server::ServerState;
use crate::validation::{validate_address, validate_chain};
use crate::refresh;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_bundles: usize,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let (status, cached_bundles) = match state.cache.count_bundles().await {
        Ok(count) => ("healthy", count),
        Err(err) => {
            warn!("failed to count cached bundles: {err}");
            ("degraded", 0)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_bundles,
    })
}

/// Get cached assets for an address on a chain
#[utoipa::path(
    get,
    path = "/api/assets/{chain}/{address}",
    params(
        ("chain" = String, Path, description = "Chain identifier, e.g. eth or sepolia"),
        ("address" = String, Path, description = "0x-prefixed hex address")
    ),
    responses(
        (status = 200, description = "Cached asset bundle (empty if never refreshed)", body = AssetBundle),
        (status = 400, description = "Invalid chain or address"),
        (status = 500, description = "Cache store error")
    ),
    tag = "assets"
)]
pub async fn get_assets(
    State(state): State<Arc<ServerState>>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<AssetBundle>, ApiError> {
    info!(%chain, %address, "assets handler");

    validate_chain(&chain)?;
    validate_address(&address)?;

    let bundle = state.cache.get_assets(&chain, &address).await.map_err(|err| {
        error!(%chain, %address, "cache lookup failed: {err}");
        err
    })?;

    Ok(Json(bundle))
}

/// Re-fetch assets from the upstream indexer and replace the cached bundle.
/// Runs synchronously: the request blocks for both outbound calls plus the
/// cache write.
#[utoipa::path(
    get,
    path = "/api/assets/{chain}/{address}/refresh",
    params(
        ("chain" = String, Path, description = "Chain identifier, e.g. eth or sepolia"),
        ("address" = String, Path, description = "0x-prefixed hex address")
    ),
    responses(
        (status = 200, description = "Assets refreshed"),
        (status = 400, description = "Invalid chain or address"),
        (status = 500, description = "Fetch or store error")
    ),
    tag = "assets"
)]
pub async fn refresh_assets(
    State(state): State<Arc<ServerState>>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    info!(%chain, %address, "refresh handler");

    validate_chain(&chain)?;
    validate_address(&address)?;

    refresh::refresh_assets(&state.moralis, &state.cache, &chain, &address)
        .await
        .map_err(|err| {
            error!(%chain, %address, "refresh assets failed: {err}");
            err
        })?;

    Ok("OK\n")
}
