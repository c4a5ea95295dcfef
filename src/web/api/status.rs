use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::web::server::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    pub total_satellites: usize,
    pub satellite_groups: usize,
    pub last_tle_update: Option<DateTime<Utc>>,
    /// Endpoint name to path template.
    #[schema(value_type = Object)]
    pub endpoints: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub satellites_loaded: usize,
    pub groups_loaded: usize,
    pub last_tle_update: Option<DateTime<Utc>>,
    pub version: String,
}

/// Service index: a short self-description plus the endpoint map.
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses(
        (status = 200, description = "Service overview", body = IndexResponse)
    )
)]
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Multi-satellite tracking and telemetry service".to_string(),
        total_satellites: state.catalog.total_satellites(),
        satellite_groups: state.catalog.group_count(),
        last_tle_update: state.refresher.last_success(),
        endpoints: serde_json::json!({
            "satellite_groups": "/api/satellites/groups",
            "constellation": "/api/constellation/{group}",
            "satellite_position": "/api/satellite/{name}/position",
            "satellite_orbit": "/api/satellite/{name}/orbit",
            "satellite_telemetry": "/api/satellite/{name}/telemetry",
            "historical_telemetry": "/api/satellite/{name}/telemetry/historical",
            "update_tle": "/api/tle/update",
            "debug": "/api/debug/satellites",
            "health": "/api/health"
        }),
    })
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "status",
    responses(
        (status = 200, description = "Liveness and catalog counters", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        satellites_loaded: state.catalog.total_satellites(),
        groups_loaded: state.catalog.group_count(),
        last_tle_update: state.refresher.last_success(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
