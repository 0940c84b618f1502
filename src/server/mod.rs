pub mod routes;

use axum::{routing::get, serve, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::cache::CacheManager;
use crate::config::AppConfig;
use crate::moralis::MoralisClient;

/// Shared handler state. The API credential and the cache handle live here
/// and reach handlers through `axum::extract::State`, never through globals.
pub struct ServerState {
    pub cache: Arc<CacheManager>,
    pub moralis: MoralisClient,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health_check,
        routes::get_assets,
        routes::refresh_assets,
    ),
    components(
        schemas(
            routes::HealthResponse,
            crate::moralis::AssetBundle,
            crate::moralis::Token,
            crate::moralis::Nft,
        )
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "assets", description = "Cached asset lookup and refresh")
    ),
    info(
        title = "Asset Cache API",
        description = "Caching proxy for ERC20 and NFT holdings indexed by Moralis",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: Arc<ServerState>) -> Router {
    let swagger_ui = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/api/health", get(routes::health_check))
        .route("/api/assets/:chain/:address", get(routes::get_assets))
        .route(
            "/api/assets/:chain/:address/refresh",
            get(routes::refresh_assets),
        )
        .merge(swagger_ui)
        .with_state(state)
        // Read-mostly public API: any origin may call it, and the layer
        // answers OPTIONS preflight on every path.
        .layer(
            CorsLayer::new()
                .allow_origin(axum::http::header::HeaderValue::from_static("*"))
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers(Any),
        )
}

pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let cache = match &config.db_path {
        Some(path) => Arc::new(CacheManager::open(path).await?),
        None => crate::cache::init_cache().await?,
    };

    let moralis = MoralisClient::new(config.moralis_api_token.clone())?;

    let state = Arc::new(ServerState { cache, moralis });
    let app = build_router(state);

    let listener = TcpListener::bind(&config.api_addr).await?;

    info!("starting api server");
    info!("  REST API: http://{}/api", config.api_addr);
    info!("  API Documentation: http://{}/docs", config.api_addr);

    serve(listener, app).await?;

    Ok(())
}
