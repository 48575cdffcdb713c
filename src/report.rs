//! Aggregation of batch rows into summary statistics and an export table
//!
//! Everything here is a pure function of the completed rows. Nothing is accumulated
//! while the batch runs.

use crate::types::{BatchRow, FailureKind, ProfileOutcome, RepositoryRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

/// Identifier shown in the export table when the input cell was blank
pub const BLANK_IDENTIFIER: &str = "None";

/// Aggregate statistics over a completed batch
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct BatchSummary {
    /// Number of input rows
    pub total_rows: usize,
    /// Rows that resolved to a repository listing
    pub successful_rows: usize,
    /// Mean repository count over successful rows; 0.0 when there are none
    pub average_repository_count: f64,
    /// Number of failed rows per failure kind
    pub failures_by_kind: BTreeMap<FailureKind, usize>,
}

/// Result column of the export table
///
/// Holds the repository count for successful rows and the failure message otherwise.
/// Serializes untagged, so the exported column is a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ResultCell {
    /// Number of repositories found
    Count(usize),
    /// Failure message
    Message(String),
}

impl std::fmt::Display for ResultCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultCell::Count(n) => write!(f, "{n}"),
            ResultCell::Message(m) => f.write_str(m),
        }
    }
}

impl From<&ProfileOutcome> for ResultCell {
    fn from(outcome: &ProfileOutcome) -> Self {
        match outcome {
            ProfileOutcome::Success { repositories } => ResultCell::Count(repositories.len()),
            ProfileOutcome::Failure { message, .. } => ResultCell::Message(message.clone()),
        }
    }
}

/// One row of the export table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct TableRow {
    /// Display label of the person
    pub identity_label: String,
    /// Identifier as entered, or [`BLANK_IDENTIFIER`]
    pub identifier: String,
    /// Repository count or failure message
    pub result: ResultCell,
}

/// Frequency of one language
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct LanguageCount {
    /// Language name
    pub language: String,
    /// Number of repositories using it
    pub count: usize,
}

/// Everything produced from one batch run
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct BatchReport {
    /// Aggregate statistics
    pub summary: BatchSummary,
    /// One export row per input row
    pub table: Vec<TableRow>,
    /// Language frequencies across all successful rows
    pub languages: Vec<LanguageCount>,
    /// Human-readable lines for failed rows
    pub failures: Vec<String>,
}

impl BatchReport {
    /// Build the report, consuming the batch rows
    pub fn from_rows(rows: Vec<BatchRow>) -> Self {
        Self {
            summary: summarize(&rows),
            table: to_table(&rows),
            languages: language_breakdown(&rows),
            failures: failure_lines(&rows),
        }
    }
}

/// Summary statistics over completed rows
pub fn summarize(rows: &[BatchRow]) -> BatchSummary {
    let mut successful_rows = 0usize;
    let mut repository_total = 0usize;
    let mut failures_by_kind = BTreeMap::new();

    for row in rows {
        match row.outcome.failure_kind() {
            None => {
                successful_rows += 1;
                repository_total += row.outcome.count();
            }
            Some(kind) => *failures_by_kind.entry(kind).or_insert(0) += 1,
        }
    }

    let average_repository_count = if successful_rows == 0 {
        0.0
    } else {
        repository_total as f64 / successful_rows as f64
    };

    BatchSummary {
        total_rows: rows.len(),
        successful_rows,
        average_repository_count,
        failures_by_kind,
    }
}

/// Flat export table with one row per input row
pub fn to_table(rows: &[BatchRow]) -> Vec<TableRow> {
    rows.iter()
        .map(|row| {
            let identifier = row.identifier.trim();
            TableRow {
                identity_label: row.identity_label.clone(),
                identifier: if identifier.is_empty() {
                    BLANK_IDENTIFIER.to_string()
                } else {
                    identifier.to_string()
                },
                result: ResultCell::from(&row.outcome),
            }
        })
        .collect()
}

/// Language frequencies for a set of repositories, excluding unknown languages
///
/// Sorted by count descending, then language name ascending.
pub fn language_frequencies<'a>(
    repositories: impl IntoIterator<Item = &'a RepositoryRecord>,
) -> Vec<LanguageCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for repo in repositories {
        if repo.has_known_language() {
            *counts.entry(repo.language.as_str()).or_insert(0) += 1;
        }
    }

    let mut languages: Vec<LanguageCount> = counts
        .into_iter()
        .map(|(language, count)| LanguageCount {
            language: language.to_string(),
            count,
        })
        .collect();
    languages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.language.cmp(&b.language)));
    languages
}

/// Language frequencies across all successful rows
pub fn language_breakdown(rows: &[BatchRow]) -> Vec<LanguageCount> {
    language_frequencies(rows.iter().flat_map(|row| row.outcome.repositories()))
}

/// One line per failed row: `Row <n> (<label>): <message>`, with `n` counted from 1
pub fn failure_lines(rows: &[BatchRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| {
            row.outcome.error_message().map(|message| {
                format!(
                    "Row {} ({}): {}",
                    row.row_index + 1,
                    row.identity_label,
                    message
                )
            })
        })
        .collect()
}
