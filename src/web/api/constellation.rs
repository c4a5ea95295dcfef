use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orbit::{evaluate_constellation, ConstellationEntry, EvaluationLimits, SatelliteOutcome};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ConstellationQuery {
    #[serde(default)]
    pub max: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConstellationResponse {
    pub group: String,
    pub group_name: String,
    pub satellites: Vec<ConstellationEntry>,
    /// Number of members that produced a position.
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/constellation/{group}",
    tag = "constellation",
    params(
        ("group" = String, Path, description = "Group key, e.g. starlink"),
        ("max" = Option<usize>, Query, description = "Cap on evaluated members, defaults to the configured limit")
    ),
    responses(
        (status = 200, description = "Positions for every member that evaluated cleanly", body = ConstellationResponse),
        (status = 404, description = "Unknown group", body = ErrorResponse)
    )
)]
pub async fn positions(
    State(state): State<AppState>,
    Path(group): Path<String>,
    Query(query): Query<ConstellationQuery>,
) -> ApiResult<Json<ConstellationResponse>> {
    let Some(snapshot) = state.catalog.group_snapshot(&group) else {
        return Err(ApiError::NotComputable(format!(
            "Constellation {group} not found"
        )));
    };

    let timestamp = Utc::now();
    let limits = EvaluationLimits {
        max_satellites: query
            .max
            .unwrap_or(state.config.evaluation.max_satellites),
        max_workers: state.config.evaluation.max_workers,
        task_timeout: state.config.evaluation.task_timeout,
    };

    let outcomes = evaluate_constellation(&snapshot, timestamp, limits).await;
    let satellites: Vec<ConstellationEntry> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            SatelliteOutcome::Position(entry) => Some(entry),
            SatelliteOutcome::Failed { .. } => None,
        })
        .collect();
    let count = satellites.len();

    Ok(Json(ConstellationResponse {
        group: snapshot.key,
        group_name: snapshot.name,
        satellites,
        count,
        timestamp,
    }))
}
