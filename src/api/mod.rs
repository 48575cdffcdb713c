//! HTTP shim exposing profile resolution
//!
//! A thin axum router with no logic of its own: each route hands its body to the
//! [`Resolver`] or the [`BatchRunner`](crate::batch::BatchRunner) and serializes the
//! result.

use crate::{Config, Resolver, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router
///
/// # Routes
///
/// - `POST /scrape-github` - Resolve one identifier: `{"github_id": "..."}`
/// - `POST /batch` - Resolve many people and return the batch report
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive documentation (when `api.swagger_ui` is set)
pub fn create_router(resolver: Arc<Resolver>, config: Arc<Config>) -> Router {
    let state = AppState::new(resolver, config.clone());

    let router = Router::new()
        .route("/scrape-github", post(routes::scrape_profile))
        .route("/batch", post(routes::run_batch))
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec));

    let router = if config.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.api.cors_enabled {
        router.layer(build_cors_layer(&config.api.cors_origins))
    } else {
        router
    }
}

/// Build a CORS layer for the configured origins; `"*"` or an empty list allows any
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on `api.bind_address`
///
/// Runs until the listener fails or the task is dropped.
///
/// # Example
///
/// ```no_run
/// use profile_scan::{Config, Resolver};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let resolver = Arc::new(Resolver::from_config(&config)?);
/// profile_scan::api::start_api_server(resolver, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(resolver: Arc<Resolver>, config: Arc<Config>) -> Result<()> {
    let bind_address = config.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(resolver, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(address = %bind_address, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}
