use utoipa::OpenApi;

use super::api::constellation::ConstellationResponse;
use super::api::error::{ErrorResponse, SatelliteNotFoundResponse, TelemetryUnavailableResponse};
use super::api::feed::UpdateBody;
use super::api::satellites::{DebugResponse, GroupListResponse, GroupSummary, GroupsResponse};
use super::api::status::{HealthResponse, IndexResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::status::index,
        super::api::status::health,
        super::api::satellites::list_groups,
        super::api::satellites::position,
        super::api::satellites::orbit,
        super::api::satellites::debug,
        super::api::telemetry::current,
        super::api::telemetry::historical,
        super::api::constellation::positions,
        super::api::feed::update,
        super::api::feed::update_post,
    ),
    components(
        schemas(
            IndexResponse,
            HealthResponse,
            GroupsResponse,
            GroupListResponse,
            GroupSummary,
            DebugResponse,
            ConstellationResponse,
            UpdateBody,
            ErrorResponse,
            SatelliteNotFoundResponse,
            TelemetryUnavailableResponse,
            crate::orbit::PositionReport,
            crate::orbit::ConstellationEntry,
            crate::telemetry::TelemetrySnapshot,
            crate::feed::RefreshReport,
            crate::feed::RefreshStatus,
        )
    ),
    info(
        title = "Satwatch Tracking API",
        description = "Multi-satellite tracking, orbit sampling and synthetic telemetry",
        version = "0.1.0"
    ),
    tags(
        (name = "status", description = "Service index and health"),
        (name = "satellites", description = "Catalog, positions and orbit tracks"),
        (name = "telemetry", description = "Synthesized telemetry"),
        (name = "constellation", description = "Whole-group position sweeps"),
        (name = "feeds", description = "Element set feed refresh")
    )
)]
pub struct ApiDoc;
