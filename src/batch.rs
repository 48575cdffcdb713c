//! Batch orchestration over many identifiers
//!
//! [`BatchRunner::run`] resolves every input row and always returns one
//! [`BatchRow`] per input, in input order. A failing row is recorded and the run moves
//! on. Progress is published as [`Event`]s on a broadcast channel rather than through
//! shared counters.

use crate::config::{BatchConfig, Config};
use crate::error::Result;
use crate::resolver::Resolver;
use crate::types::{BatchInput, BatchRow, Event, FailureKind, ProfileOutcome};
use futures::stream::{self, StreamExt};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Capacity of the progress event channel
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Failure message for rows skipped by an explicit cancellation
pub const CANCELLED_MESSAGE: &str = "Batch cancelled";

/// Failure message for rows skipped because the batch deadline passed
pub const DEADLINE_MESSAGE: &str = "Batch deadline exceeded";

/// Drives a [`Resolver`] over an ordered collection of rows
pub struct BatchRunner {
    resolver: Resolver,
    config: BatchConfig,
    event_tx: broadcast::Sender<Event>,
    cancel_token: Mutex<CancellationToken>,
}

impl BatchRunner {
    /// Create a runner with explicit batch settings
    pub fn new(resolver: Resolver, config: BatchConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            resolver,
            config,
            event_tx,
            cancel_token: Mutex::new(CancellationToken::new()),
        }
    }

    /// Create the production runner from configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Resolver::from_config(config)?, config.batch.clone()))
    }

    /// Subscribe to progress events
    ///
    /// Receivers only see events sent after they subscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Token that cancels the current (or next) batch
    ///
    /// Rows not yet resolved are recorded as cancelled. A run that ends cancelled installs
    /// a fresh token, so later runs on the same runner start uncancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token_slot().clone()
    }

    /// Cancel the current (or next) batch
    pub fn cancel(&self) {
        self.token_slot().cancel();
    }

    fn token_slot(&self) -> MutexGuard<'_, CancellationToken> {
        // The guarded value is a plain token, so a poisoned lock is still usable
        self.cancel_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the token if it was cancelled during the run that used `token`
    fn reset_cancelled(&self, token: &CancellationToken) {
        if token.is_cancelled() {
            let mut slot = self.token_slot();
            if slot.is_cancelled() {
                *slot = CancellationToken::new();
            }
        }
    }

    fn emit_event(&self, event: Event) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }

    /// Resolve every row
    ///
    /// Rows are resolved up to `concurrency` at a time and written into index-addressed
    /// slots, so output order never depends on completion order. A `RowResolved` event
    /// with monotonically increasing `progress` is emitted after each row.
    pub async fn run(&self, inputs: Vec<BatchInput>) -> Vec<BatchRow> {
        let total = inputs.len();
        let concurrency = self.config.concurrency.max(1);
        // A deadline too far out to represent is no deadline
        let deadline = self
            .config
            .deadline
            .and_then(|d| Instant::now().checked_add(d));
        let cancel_token = self.cancellation_token();

        tracing::info!(total, concurrency, "Starting batch");
        self.emit_event(Event::BatchStarted { total });

        let mut slots: Vec<Option<ProfileOutcome>> = vec![None; total];
        let mut completed = 0usize;
        let mut successful = 0usize;

        let identifiers: Vec<(usize, String)> = inputs
            .iter()
            .map(|input| input.identifier.clone())
            .enumerate()
            .collect();

        let mut resolved = stream::iter(identifiers)
            .map(|(row_index, identifier)| {
                let cancel_token = cancel_token.clone();
                async move {
                    let outcome = self
                        .resolve_row(&identifier, &cancel_token, deadline)
                        .await;
                    (row_index, outcome)
                }
            })
            .buffer_unordered(concurrency);

        while let Some((row_index, outcome)) = resolved.next().await {
            completed += 1;
            let success = outcome.is_success();
            if success {
                successful += 1;
            }

            tracing::debug!(
                row_index,
                completed,
                total,
                success,
                "Row resolved"
            );
            self.emit_event(Event::RowResolved {
                row_index,
                success,
                progress: completed as f64 / total as f64,
            });

            slots[row_index] = Some(outcome);
        }
        drop(resolved);

        let rows: Vec<BatchRow> = inputs
            .into_iter()
            .zip(slots)
            .enumerate()
            .map(|(row_index, (input, slot))| BatchRow {
                row_index,
                identity_label: input.identity_label,
                identifier: input.identifier,
                // Every index is yielded exactly once by the stream above
                outcome: slot.unwrap_or_else(|| {
                    ProfileOutcome::failure(FailureKind::Cancelled, CANCELLED_MESSAGE)
                }),
            })
            .collect();

        self.reset_cancelled(&cancel_token);

        tracing::info!(total, successful, "Batch finished");
        self.emit_event(Event::BatchFinished { total, successful });

        rows
    }

    async fn resolve_row(
        &self,
        raw: &str,
        cancel_token: &CancellationToken,
        deadline: Option<Instant>,
    ) -> ProfileOutcome {
        if cancel_token.is_cancelled() {
            return ProfileOutcome::failure(FailureKind::Cancelled, CANCELLED_MESSAGE);
        }

        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                ProfileOutcome::failure(FailureKind::Cancelled, CANCELLED_MESSAGE)
            }
            _ = wait_until(deadline) => {
                ProfileOutcome::failure(FailureKind::Cancelled, DEADLINE_MESSAGE)
            }
            outcome = self.resolver.resolve(raw) => outcome,
        }
    }
}

/// Sleep until `deadline`, or forever when there is none
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
