//! OpenAPI documentation for the HTTP shim

use utoipa::OpenApi;

/// OpenAPI documentation for the profile-scan API
///
/// Served as JSON at `/openapi.json` and browsable at `/swagger-ui` when enabled.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "profile-scan API",
        description = "Resolve GitHub handles into repository listings, one at a time or in batches",
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        crate::api::routes::scrape_profile,
        crate::api::routes::run_batch,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::RepositoryRecord,
        crate::types::FailureKind,
        crate::types::ProfileResponse,
        crate::report::BatchReport,
        crate::report::BatchSummary,
        crate::report::TableRow,
        crate::report::ResultCell,
        crate::report::LanguageCount,
        crate::api::routes::ScrapeRequest,
        crate::api::routes::BatchRequest,
        crate::api::routes::BatchRequestRow,
    )),
    tags(
        (name = "profiles", description = "Profile resolution - Single lookups and batches"),
        (name = "system", description = "System endpoints - Health check and OpenAPI spec"),
    )
)]
pub struct ApiDoc;
