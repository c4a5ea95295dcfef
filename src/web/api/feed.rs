use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::feed::RefreshReport;
use crate::web::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuery {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub force: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBody {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub force: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/tle/update",
    tag = "feeds",
    params(
        ("group" = Option<String>, Query, description = "Refresh only this group key"),
        ("force" = Option<bool>, Query, description = "Bypass the staleness window")
    ),
    responses(
        (status = 200, description = "Refresh outcome", body = RefreshReport)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<UpdateQuery>,
) -> Json<RefreshReport> {
    run_update(&state, query.group, query.force).await
}

#[utoipa::path(
    post,
    path = "/api/tle/update",
    tag = "feeds",
    request_body = UpdateBody,
    params(
        ("group" = Option<String>, Query, description = "Refresh only this group key"),
        ("force" = Option<bool>, Query, description = "Bypass the staleness window")
    ),
    responses(
        (status = 200, description = "Refresh outcome", body = RefreshReport)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<UpdateBody>>,
) -> Json<RefreshReport> {
    // Body fields win over query parameters when both are present.
    let body = body.map(|Json(inner)| inner).unwrap_or_default();
    run_update(
        &state,
        body.group.or(query.group),
        body.force.or(query.force),
    )
    .await
}

async fn run_update(
    state: &AppState,
    group: Option<String>,
    force: Option<bool>,
) -> Json<RefreshReport> {
    let report = state
        .refresher
        .refresh(group.as_deref(), force.unwrap_or(false))
        .await;
    Json(report)
}
