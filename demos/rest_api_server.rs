//! REST API server example
//!
//! After starting, you can:
//! - View Swagger UI at http://localhost:8000/swagger-ui
//! - Resolve one handle via POST http://localhost:8000/scrape-github
//! - Resolve a batch via POST http://localhost:8000/batch

use profile_scan::api::start_api_server;
use profile_scan::{Config, Resolver};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Load settings from a JSON file when one is given, defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let config = Arc::new(config);

    let resolver = Arc::new(Resolver::from_config(&config)?);

    println!("API server listening on http://{}", config.api.bind_address);
    println!();
    println!("Try:");
    println!(
        "  curl -X POST http://{}/scrape-github -H 'content-type: application/json' -d '{{\"github_id\": \"torvalds\"}}'",
        config.api.bind_address
    );

    start_api_server(resolver, config).await?;

    Ok(())
}
