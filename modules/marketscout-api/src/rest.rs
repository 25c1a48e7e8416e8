use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use marketscout_common::EntityKind;
use marketscout_discovery::DiscoveryOptions;
use serde::Deserialize;
use tracing::info;

use crate::AppState;

fn default_max_results() -> i64 {
    20
}

fn default_include_coordinates() -> bool {
    true
}

fn default_stage() -> String {
    "seed".to_string()
}

#[derive(Deserialize)]
pub struct DiscoveryRequest {
    pub domain: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    #[serde(default = "default_include_coordinates")]
    pub include_coordinates: bool,
    /// Funding stage; only meaningful for investor discovery.
    #[serde(default = "default_stage")]
    pub stage: String,
}

/// Caller input errors are rejected here, before the pipeline runs.
/// Returns the validated options or a 400 message.
pub fn validate_request(request: &DiscoveryRequest) -> Result<DiscoveryOptions, &'static str> {
    if request.domain.trim().is_empty() {
        return Err("domain must be a non-empty string");
    }
    if request.max_results <= 0 {
        return Err("max_results must be a positive integer");
    }
    Ok(DiscoveryOptions {
        max_results: request.max_results as usize,
        include_coordinates: request.include_coordinates,
    })
}

pub async fn find_cofounders(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DiscoveryRequest>,
) -> impl IntoResponse {
    discover(state, EntityKind::Cofounder, "cofounders", request).await
}

pub async fn find_vcs(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DiscoveryRequest>,
) -> impl IntoResponse {
    discover(state, EntityKind::Investor, "vcs", request).await
}

pub async fn find_competitors(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DiscoveryRequest>,
) -> impl IntoResponse {
    discover(state, EntityKind::Competitor, "competitors", request).await
}

async fn discover(
    state: Arc<AppState>,
    kind: EntityKind,
    records_key: &'static str,
    request: DiscoveryRequest,
) -> axum::response::Response {
    let options = match validate_request(&request) {
        Ok(options) => options,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": message})),
            )
                .into_response();
        }
    };

    let stage = match kind {
        EntityKind::Investor => Some(request.stage.as_str()),
        _ => None,
    };

    let result = state
        .pipeline
        .run(kind, request.domain.trim(), stage, options)
        .await;

    info!(
        kind = kind.label(),
        total_found = result.total_found,
        returned = result.records.len(),
        "discovery request served"
    );

    Json(result.to_json(records_key)).into_response()
}
