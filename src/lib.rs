//! # profile-scan
//!
//! Batch resolver that turns a list of GitHub handles into repository listings.
//!
//! For each identifier the crate validates the handle, fetches the hosted repositories
//! page, extracts the repository entries from its markup and classifies any failure.
//! One bad identifier never aborts a batch: every row ends up with either a repository
//! list or a human-readable failure message.
//!
//! ## Pipeline
//!
//! - [`validate`](validate::validate) - normalise and syntax-check a raw handle
//! - [`PageFetcher`] / [`HttpFetcher`] - one GET per identifier, with timeout
//! - [`ListingParser`] / [`RepositoryListParser`] - extract repository records
//! - [`Resolver`] - compose the three into a single [`ProfileOutcome`]
//! - [`BatchRunner`] - drive the resolver over ordered rows, publishing progress
//! - [`report`] - summary statistics, export table and language breakdown
//!
//! ## Quick Start
//!
//! ```no_run
//! use profile_scan::{BatchInput, BatchReport, BatchRunner, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = BatchRunner::from_config(&Config::default())?;
//!
//!     let mut events = runner.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let rows = runner
//!         .run(vec![
//!             BatchInput::from_name_parts("Linus", "Torvalds", "torvalds"),
//!             BatchInput::from_name_parts("No", "Body", "none"),
//!         ])
//!         .await;
//!
//!     let report = BatchReport::from_rows(rows);
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP shim exposing resolution over the network
pub mod api;
/// Batch orchestration
pub mod batch;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Remote page retrieval
pub mod fetcher;
/// Repository listing extraction
pub mod parser;
/// Summary statistics and export table
pub mod report;
/// Per-identifier resolution
pub mod resolver;
/// Retry logic with exponential backoff
pub mod retry;
/// Core types and events
pub mod types;
/// Identifier validation
pub mod validate;

// Re-export commonly used types
pub use batch::BatchRunner;
pub use config::{BatchConfig, Config, FetchConfig, RetryConfig};
pub use error::{Error, FetchError, ParseError, ResolveError, Result};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use parser::{ListingParser, RepositoryListParser};
pub use report::{BatchReport, BatchSummary, LanguageCount, ResultCell, TableRow};
pub use resolver::Resolver;
pub use types::{
    BatchInput, BatchRow, Event, FailureKind, Identifier, ProfileOutcome, ProfileResponse,
    RawDocument, RepositoryRecord,
};
