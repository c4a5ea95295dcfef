use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::orbit::position_report;
use crate::telemetry::TelemetrySnapshot;
use crate::web::api::error::{ApiError, ApiResult, TelemetryUnavailableResponse};
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/satellite/{name}/telemetry",
    tag = "telemetry",
    params(
        ("name" = String, Path, description = "Satellite name, alias or substring")
    ),
    responses(
        (status = 200, description = "Synthesized telemetry for the current position", body = TelemetrySnapshot),
        (status = 404, description = "Telemetry could not be generated", body = TelemetryUnavailableResponse)
    )
)]
pub async fn current(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<TelemetrySnapshot>> {
    let Some(record) = state.catalog.resolve_record(&name) else {
        return Err(ApiError::telemetry_unavailable(&state.catalog, &name));
    };

    let report = match position_report(&record, &name, Utc::now()) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("telemetry position failed for {}: {e}", record.name);
            return Err(ApiError::telemetry_unavailable(&state.catalog, &name));
        }
    };

    let snapshot = state.telemetry.lock().unwrap().synthesize(Some(&report));
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct HistoricalQuery {
    #[serde(default)]
    pub hours: Option<i64>,
    #[serde(default)]
    pub max_points: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/satellite/{name}/telemetry/historical",
    tag = "telemetry",
    params(
        ("name" = String, Path, description = "Satellite name, alias or substring"),
        ("hours" = Option<i64>, Query, description = "Window length ending now, defaults to 2"),
        ("max_points" = Option<i64>, Query, description = "Upper bound on returned samples, defaults to 120")
    ),
    responses(
        (status = 200, description = "Telemetry series over the window, oldest first", body = Vec<TelemetrySnapshot>)
    )
)]
pub async fn historical(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HistoricalQuery>,
) -> Json<Vec<TelemetrySnapshot>> {
    // An unknown name yields an empty series rather than an error.
    let Some(record) = state.catalog.resolve_record(&name) else {
        return Json(Vec::new());
    };

    let hours = query.hours.unwrap_or(2).max(0);
    let max_points = query.max_points.unwrap_or(120).clamp(1, 1000);
    let total_minutes = hours * 60;
    let step_minutes = (total_minutes / max_points).max(1);
    let start = Utc::now() - Duration::hours(hours);

    let mut series = Vec::new();
    let mut synthesizer = state.telemetry.lock().unwrap();
    let mut offset = 0;
    while offset < total_minutes {
        let timestamp = start + Duration::minutes(offset);
        match position_report(&record, &name, timestamp) {
            Ok(report) => series.push(synthesizer.synthesize_at(Some(&report), timestamp)),
            Err(e) => log::debug!("skipping sample for {}: {e}", record.name),
        }
        offset += step_minutes;
    }

    Json(series)
}
