use axum::{routing::get, routing::post, Router};
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::CatalogStore;
use crate::feed::RefreshScheduler;
use crate::telemetry::TelemetrySynthesizer;

use super::api::constellation as constellation_handlers;
use super::api::feed as feed_handlers;
use super::api::satellites as satellite_handlers;
use super::api::status as status_handlers;
use super::api::telemetry as telemetry_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogStore>,
    pub refresher: Arc<RefreshScheduler>,
    pub telemetry: Arc<Mutex<TelemetrySynthesizer>>,
}

pub async fn run_server(
    config: Config,
    catalog: Arc<CatalogStore>,
    refresher: Arc<RefreshScheduler>,
) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let state = AppState {
        config: Arc::new(config),
        catalog,
        refresher,
        telemetry: Arc::new(Mutex::new(TelemetrySynthesizer::new())),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Status endpoints
        .route("/", get(status_handlers::index))
        .route("/api/health", get(status_handlers::health))
        // Catalog and position endpoints
        .route(
            "/api/satellites/groups",
            get(satellite_handlers::list_groups),
        )
        .route(
            "/api/satellite/{name}/position",
            get(satellite_handlers::position),
        )
        .route("/api/satellite/{name}/orbit", get(satellite_handlers::orbit))
        .route("/api/debug/satellites", get(satellite_handlers::debug))
        // Telemetry endpoints
        .route(
            "/api/satellite/{name}/telemetry",
            get(telemetry_handlers::current),
        )
        .route(
            "/api/satellite/{name}/telemetry/historical",
            get(telemetry_handlers::historical),
        )
        // Constellation endpoint
        .route(
            "/api/constellation/{group}",
            get(constellation_handlers::positions),
        )
        // Feed refresh endpoints
        .route("/api/tle/update", get(feed_handlers::update))
        .route("/api/tle/update", post(feed_handlers::update_post))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
