use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orbit::{orbit_track, position_report, PositionReport};
use crate::web::api::error::{ApiError, ApiResult, SatelliteNotFoundResponse};
use crate::web::server::AppState;

/// Longest orbit track a single request may ask for.
const MAX_TRACK_SAMPLES: usize = 1440;

#[derive(Debug, Deserialize)]
pub struct GroupsQuery {
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupListResponse {
    pub group: String,
    pub name: String,
    pub satellites: Vec<String>,
    pub count: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupSummary {
    pub name: String,
    pub count: usize,
    /// First few member names, as a preview.
    pub satellites: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupsResponse {
    pub total_satellites: usize,
    #[schema(value_type = Object)]
    pub groups: IndexMap<String, GroupSummary>,
    pub last_update: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/satellites/groups",
    tag = "satellites",
    params(
        ("group" = Option<String>, Query, description = "Restrict the listing to one group key")
    ),
    responses(
        (status = 200, description = "Group summary, or one group's full member list when `group` matches", body = GroupsResponse)
    )
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Response {
    if let Some(key) = query.group.as_deref() {
        if let Some(overview) = state.catalog.group_overview(key) {
            return Json(GroupListResponse {
                group: overview.key,
                name: overview.name,
                count: overview.member_names.len(),
                satellites: overview.member_names,
                last_updated: overview.last_updated,
            })
            .into_response();
        }
    }

    // No group given, or an unknown key: fall through to the summary of
    // every group with a short member preview.
    let groups: IndexMap<String, GroupSummary> = state
        .catalog
        .group_overviews()
        .into_iter()
        .map(|overview| {
            (
                overview.key,
                GroupSummary {
                    name: overview.name,
                    count: overview.member_names.len(),
                    satellites: overview.member_names.into_iter().take(10).collect(),
                },
            )
        })
        .collect();

    Json(GroupsResponse {
        total_satellites: state.catalog.total_satellites(),
        groups,
        last_update: state.refresher.last_success(),
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct PositionQuery {
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/satellite/{name}/position",
    tag = "satellites",
    params(
        ("name" = String, Path, description = "Satellite name, alias or substring"),
        ("at" = Option<String>, Query, description = "Evaluation time (RFC3339), defaults to now")
    ),
    responses(
        (status = 200, description = "Current geodetic position", body = PositionReport),
        (status = 404, description = "Unknown satellite", body = SatelliteNotFoundResponse)
    )
)]
pub async fn position(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PositionQuery>,
) -> ApiResult<Json<PositionReport>> {
    let record = state
        .catalog
        .resolve_record(&name)
        .ok_or_else(|| ApiError::satellite_not_found(&state.catalog, &name))?;

    let at = query.at.unwrap_or_else(Utc::now);
    let report = position_report(&record, &name, at).map_err(|e| {
        log::warn!("position failed for {}: {e}", record.name);
        ApiError::satellite_not_found(&state.catalog, &name)
    })?;

    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct OrbitQuery {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub step_seconds: Option<i64>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/satellite/{name}/orbit",
    tag = "satellites",
    params(
        ("name" = String, Path, description = "Satellite name, alias or substring"),
        ("start" = Option<String>, Query, description = "Track start (RFC3339), defaults to now"),
        ("step_seconds" = Option<i64>, Query, description = "Seconds between samples, defaults to 60"),
        ("count" = Option<usize>, Query, description = "Number of samples, defaults to 120, capped at 1440")
    ),
    responses(
        (status = 200, description = "Sampled orbit track", body = Vec<PositionReport>),
        (status = 404, description = "Track could not be computed", body = crate::web::api::error::ErrorResponse)
    )
)]
pub async fn orbit(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<OrbitQuery>,
) -> ApiResult<Json<Vec<PositionReport>>> {
    let not_computable = || ApiError::NotComputable(format!("Could not calculate orbit for {name}"));

    let record = state.catalog.resolve_record(&name).ok_or_else(not_computable)?;

    let start = query.start.unwrap_or_else(Utc::now);
    let step = Duration::seconds(query.step_seconds.unwrap_or(60).max(1));
    let count = query.count.unwrap_or(120).min(MAX_TRACK_SAMPLES);

    let track = orbit_track(&record, &name, start, step, count);
    if track.is_empty() {
        return Err(not_computable());
    }

    Ok(Json(track))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DebugResponse {
    pub total_satellites: usize,
    pub satellite_names: Vec<String>,
    /// Group key to its first few member names.
    #[schema(value_type = Object)]
    pub groups: IndexMap<String, Vec<String>>,
    pub iss_matches: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/debug/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "Full name dump for troubleshooting lookups", body = DebugResponse)
    )
)]
pub async fn debug(State(state): State<AppState>) -> Json<DebugResponse> {
    let names = state.catalog.satellite_names();
    let total = names.len();

    let groups: IndexMap<String, Vec<String>> = state
        .catalog
        .group_overviews()
        .into_iter()
        .map(|overview| {
            (
                overview.key,
                overview.member_names.into_iter().take(5).collect(),
            )
        })
        .collect();

    let iss_matches = names
        .iter()
        .filter(|name| name.to_uppercase().contains("ISS"))
        .cloned()
        .collect();

    Json(DebugResponse {
        total_satellites: total,
        satellite_names: names,
        groups,
        iss_matches,
    })
}
