//! Route handlers for the HTTP shim

use crate::api::AppState;
use crate::batch::BatchRunner;
use crate::report::BatchReport;
use crate::types::{BatchInput, ProfileOutcome};
use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Body of POST /scrape-github
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ScrapeRequest {
    /// Raw identifier; validated by the resolver, not by the route
    pub github_id: String,
}

/// One person in POST /batch
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BatchRequestRow {
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Raw identifier
    #[serde(default)]
    pub github_id: String,
}

/// Body of POST /batch
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BatchRequest {
    /// Rows in input order
    pub rows: Vec<BatchRequestRow>,
}

/// POST /scrape-github - Resolve one identifier
///
/// Always answers 200; resolution failures are reported in the `error` field.
#[utoipa::path(
    post,
    path = "/scrape-github",
    tag = "profiles",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Repository listing or failure message", body = crate::types::ProfileResponse),
        (status = 422, description = "Body is missing the github_id field")
    )
)]
pub async fn scrape_profile(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Json<ProfileOutcome> {
    Json(state.resolver.resolve(&request.github_id).await)
}

/// POST /batch - Resolve a list of people and return the aggregated report
#[utoipa::path(
    post,
    path = "/batch",
    tag = "profiles",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Summary, export table and language breakdown", body = BatchReport)
    )
)]
pub async fn run_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Json<BatchReport> {
    let inputs = request
        .rows
        .iter()
        .map(|row| BatchInput::from_name_parts(&row.first_name, &row.last_name, &row.github_id))
        .collect();

    let runner = BatchRunner::new((*state.resolver).clone(), state.config.batch.clone());
    let rows = runner.run(inputs).await;

    Json(BatchReport::from_rows(rows))
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.1 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}
