use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogStore;

/// Errors surfaced to API clients. Every variant maps to a 404 with a
/// payload that tells the caller what to try instead.
#[derive(Debug)]
pub enum ApiError {
    /// Lookup failed; carries a sample of known names for the caller.
    SatelliteNotFound {
        requested: String,
        known_names: Vec<String>,
        total: usize,
    },
    /// Telemetry could not be produced, either because the name is
    /// unknown or because propagation failed.
    TelemetryUnavailable {
        requested: String,
        known_names: Vec<String>,
    },
    /// Anything else that maps to a bare `{"error": ...}` body.
    NotComputable(String),
}

impl ApiError {
    pub fn satellite_not_found(catalog: &CatalogStore, requested: &str) -> Self {
        let names = catalog.satellite_names();
        let total = names.len();
        Self::SatelliteNotFound {
            requested: requested.to_string(),
            known_names: names.into_iter().take(10).collect(),
            total,
        }
    }

    pub fn telemetry_unavailable(catalog: &CatalogStore, requested: &str) -> Self {
        Self::TelemetryUnavailable {
            requested: requested.to_string(),
            known_names: catalog.satellite_names().into_iter().take(5).collect(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::SatelliteNotFound {
                requested,
                known_names,
                total,
            } => (
                StatusCode::NOT_FOUND,
                Json(SatelliteNotFoundResponse {
                    error: format!("Satellite {requested} not found"),
                    suggestion: "Try one of these available satellites:".to_string(),
                    available_satellites: known_names,
                    total_satellites: total,
                }),
            )
                .into_response(),
            ApiError::TelemetryUnavailable {
                requested,
                known_names,
            } => (
                StatusCode::NOT_FOUND,
                Json(TelemetryUnavailableResponse {
                    error: format!("Could not generate telemetry for {requested}"),
                    available_satellites: known_names,
                }),
            )
                .into_response(),
            ApiError::NotComputable(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteNotFoundResponse {
    pub error: String,
    pub suggestion: String,
    pub available_satellites: Vec<String>,
    pub total_satellites: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TelemetryUnavailableResponse {
    pub error: String,
    pub available_satellites: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GroupSpec;

    fn empty_catalog() -> CatalogStore {
        CatalogStore::new(vec![GroupSpec {
            key: "space_stations".to_string(),
            name: "Space Stations".to_string(),
            url: "http://unused.invalid/feed".to_string(),
        }])
    }

    #[test]
    fn not_found_payload_names_the_query() {
        let catalog = empty_catalog();
        let error = ApiError::satellite_not_found(&catalog, "NOSUCHSAT");

        match error {
            ApiError::SatelliteNotFound {
                requested,
                known_names,
                total,
            } => {
                assert_eq!(requested, "NOSUCHSAT");
                assert!(known_names.is_empty());
                assert_eq!(total, 0);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let catalog = empty_catalog();
        let response = ApiError::satellite_not_found(&catalog, "X").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bare_error_maps_to_404() {
        let response =
            ApiError::NotComputable("Constellation nope not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
