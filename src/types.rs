//! Core types for profile-scan

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Language value used when a repository entry carries no language marker
pub const UNKNOWN: &str = "Unknown";

/// Validated account handle
///
/// Only [`validate`](crate::validate::validate) produces an `Identifier`, so holding one
/// proves the handle is non-empty and matches `^[A-Za-z0-9-]+$`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the handle as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetched profile page
#[derive(Clone, Debug)]
pub struct RawDocument {
    url: String,
    body: String,
}

impl RawDocument {
    /// Create a document from the URL it was fetched from and its body
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// URL the document was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw markup
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// One repository extracted from a profile's listing page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RepositoryRecord {
    /// Repository name, or [`UNKNOWN`] when the entry has no name marker
    pub name: String,
    /// Link to the repository; empty when the name is unknown
    pub link: String,
    /// Primary language, or [`UNKNOWN`] when absent
    pub language: String,
    /// Description; empty when absent
    pub description: String,
}

impl RepositoryRecord {
    /// Whether the entry carries a real language value
    pub fn has_known_language(&self) -> bool {
        self.language != UNKNOWN
    }
}

/// Classification of a per-identifier failure
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Identifier missing or malformed; no network call was made
    InvalidIdentifier,
    /// Transport failure, timeout or non-2xx response
    NetworkError,
    /// Page fetched but the repository listing is absent
    NotFound,
    /// Unexpected failure while extracting repositories
    ScrapingError,
    /// The batch was cancelled or hit its deadline before this row resolved
    Cancelled,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::InvalidIdentifier => "invalid_identifier",
            FailureKind::NetworkError => "network_error",
            FailureKind::NotFound => "not_found",
            FailureKind::ScrapingError => "scraping_error",
            FailureKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Result of resolving one identifier
///
/// Serializes to the wire shape `{error?, count, repos}` (see [`ProfileResponse`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "ProfileResponse")]
pub enum ProfileOutcome {
    /// The listing was parsed
    Success {
        /// Repositories in page order
        repositories: Vec<RepositoryRecord>,
    },
    /// The identifier could not be resolved
    Failure {
        /// Failure classification
        kind: FailureKind,
        /// Human-readable message
        message: String,
    },
}

impl ProfileOutcome {
    /// Wrap a parsed listing
    pub fn success(repositories: Vec<RepositoryRecord>) -> Self {
        ProfileOutcome::Success { repositories }
    }

    /// Build a failure outcome
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        ProfileOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, ProfileOutcome::Success { .. })
    }

    /// Number of repositories; always the length of the parsed listing, 0 on failure
    pub fn count(&self) -> usize {
        self.repositories().len()
    }

    /// Parsed repositories, empty on failure
    pub fn repositories(&self) -> &[RepositoryRecord] {
        match self {
            ProfileOutcome::Success { repositories } => repositories,
            ProfileOutcome::Failure { .. } => &[],
        }
    }

    /// Failure kind, if any
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ProfileOutcome::Success { .. } => None,
            ProfileOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProfileOutcome::Success { .. } => None,
            ProfileOutcome::Failure { message, .. } => Some(message),
        }
    }
}

/// Wire representation of a [`ProfileOutcome`]
///
/// `error` is present iff the outcome is a failure, in which case `count` is 0 and
/// `repos` is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of repositories
    pub count: usize,
    /// Repositories
    pub repos: Vec<RepositoryRecord>,
}

impl From<ProfileOutcome> for ProfileResponse {
    fn from(outcome: ProfileOutcome) -> Self {
        match outcome {
            ProfileOutcome::Success { repositories } => ProfileResponse {
                error: None,
                count: repositories.len(),
                repos: repositories,
            },
            ProfileOutcome::Failure { message, .. } => ProfileResponse {
                error: Some(message),
                count: 0,
                repos: Vec::new(),
            },
        }
    }
}

/// One row handed to the batch runner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInput {
    /// Display label for the person behind the identifier
    pub identity_label: String,
    /// Raw, unvalidated identifier
    #[serde(default)]
    pub identifier: String,
}

impl BatchInput {
    /// Create an input row
    pub fn new(identity_label: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            identity_label: identity_label.into(),
            identifier: identifier.into(),
        }
    }

    /// Create an input row labelled "First Last"
    pub fn from_name_parts(first_name: &str, last_name: &str, identifier: &str) -> Self {
        let label = format!("{} {}", first_name.trim(), last_name.trim());
        Self::new(label.trim(), identifier)
    }
}

/// Outcome of one batch input row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    /// Zero-based position in the input
    pub row_index: usize,
    /// Display label copied from the input
    pub identity_label: String,
    /// Raw identifier copied from the input
    pub identifier: String,
    /// Resolution outcome
    pub outcome: ProfileOutcome,
}

/// Event emitted while a batch runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Batch accepted
    BatchStarted {
        /// Number of rows in the batch
        total: usize,
    },

    /// One row finished, successfully or not
    RowResolved {
        /// Zero-based row index
        row_index: usize,
        /// Whether the row resolved to a repository listing
        success: bool,
        /// Completed rows divided by total rows (0.0 to 1.0)
        progress: f64,
    },

    /// All rows have an outcome
    BatchFinished {
        /// Number of rows in the batch
        total: usize,
        /// Number of successful rows
        successful: usize,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, language: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            link: format!("https://github.com/octo/{name}"),
            language: language.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn count_tracks_repository_list_length() {
        let outcome = ProfileOutcome::success(vec![record("a", "Rust"), record("b", UNKNOWN)]);
        assert_eq!(outcome.count(), 2);
        assert_eq!(outcome.count(), outcome.repositories().len());
        assert!(outcome.is_success());
        assert_eq!(outcome.failure_kind(), None);
    }

    #[test]
    fn failure_has_zero_count_and_message() {
        let outcome = ProfileOutcome::failure(FailureKind::NotFound, "No repositories found");
        assert_eq!(outcome.count(), 0);
        assert!(outcome.repositories().is_empty());
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NotFound));
        assert_eq!(outcome.error_message(), Some("No repositories found"));
    }

    #[test]
    fn success_serializes_without_error_field() {
        let outcome = ProfileOutcome::success(vec![record("linux", "C")]);
        let json = serde_json::to_value(&outcome).unwrap();

        assert!(json.get("error").is_none());
        assert_eq!(json["count"], 1);
        assert_eq!(json["repos"][0]["name"], "linux");
        assert_eq!(json["repos"][0]["language"], "C");
    }

    #[test]
    fn failure_serializes_with_error_and_empty_repos() {
        let outcome =
            ProfileOutcome::failure(FailureKind::InvalidIdentifier, "No identifier provided");
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["error"], "No identifier provided");
        assert_eq!(json["count"], 0);
        assert_eq!(json["repos"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn unknown_language_is_not_known() {
        assert!(!record("x", UNKNOWN).has_known_language());
        assert!(record("x", "Go").has_known_language());
    }

    #[test]
    fn name_parts_build_label() {
        let input = BatchInput::from_name_parts(" Linus ", "Torvalds", "torvalds");
        assert_eq!(input.identity_label, "Linus Torvalds");
        assert_eq!(input.identifier, "torvalds");

        let input = BatchInput::from_name_parts("", "Solo", "x");
        assert_eq!(input.identity_label, "Solo");
    }

    #[test]
    fn event_is_tagged_by_type() {
        let event = Event::RowResolved {
            row_index: 3,
            success: false,
            progress: 0.5,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "row_resolved");
        assert_eq!(json["row_index"], 3);
        assert_eq!(json["progress"], 0.5);
    }

    #[test]
    fn failure_kind_display_matches_serde_name() {
        for kind in [
            FailureKind::InvalidIdentifier,
            FailureKind::NetworkError,
            FailureKind::NotFound,
            FailureKind::ScrapingError,
            FailureKind::Cancelled,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
        }
    }
}
