use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, routing::post, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

use llm_client::SonarClient;
use mapbox_client::MapboxClient;
use marketscout_common::Config;
use marketscout_discovery::DiscoveryPipeline;

mod rest;

pub struct AppState {
    pub pipeline: DiscoveryPipeline,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("marketscout=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let chat = Arc::new(SonarClient::new(config.perplexity_api_key.clone()));
    // Without a token every geocode resolves to fallback coordinates.
    let geocode = Arc::new(MapboxClient::new(config.mapbox_token.clone().unwrap_or_default()));

    let state = Arc::new(AppState {
        pipeline: DiscoveryPipeline::new(chat, geocode),
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Discovery endpoints
        .route("/find-cofounders", post(rest::find_cofounders))
        .route("/find-vcs", post(rest::find_vcs))
        .route("/find-competitors", post(rest::find_competitors))
        .with_state(state)
        // CORS: permissive, same as the original dev setup
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("MarketScout API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
