//! Per-identifier resolution: validate, fetch, parse

use crate::config::{Config, RetryConfig};
use crate::error::{ResolveError, Result};
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::parser::{ListingParser, RepositoryListParser};
use crate::retry::with_retry;
use crate::types::{ProfileOutcome, RepositoryRecord};
use crate::validate::validate;
use std::sync::Arc;

/// Resolves one raw identifier to a [`ProfileOutcome`]
///
/// Holds no mutable state; a single instance can be shared across concurrent rows.
#[derive(Clone)]
pub struct Resolver {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn ListingParser>,
    retry: RetryConfig,
}

impl Resolver {
    /// Create a resolver from explicit components, with retries disabled
    pub fn new(fetcher: Arc<dyn PageFetcher>, parser: Arc<dyn ListingParser>) -> Self {
        Self {
            fetcher,
            parser,
            retry: RetryConfig::default(),
        }
    }

    /// Create the production resolver: HTTP fetcher plus the current page layout parser
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config)?;
        let parser = RepositoryListParser::from_config(config)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(parser)).with_retry(config.retry.clone()))
    }

    /// Replace the retry policy applied to fetches
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve a raw identifier
    ///
    /// Never fails: every problem is classified into a
    /// [`ProfileOutcome::Failure`].
    pub async fn resolve(&self, raw: &str) -> ProfileOutcome {
        match self.try_resolve(raw).await {
            Ok(repositories) => ProfileOutcome::success(repositories),
            Err(e) => {
                let kind = e.kind();
                tracing::warn!(
                    identifier = raw.trim(),
                    kind = %kind,
                    error = %e,
                    "Profile resolution failed"
                );
                ProfileOutcome::failure(kind, e.to_string())
            }
        }
    }

    async fn try_resolve(
        &self,
        raw: &str,
    ) -> std::result::Result<Vec<RepositoryRecord>, ResolveError> {
        let identifier = validate(raw)?;

        let document = with_retry(&self.retry, || self.fetcher.fetch(&identifier)).await?;

        let repositories = self.parser.parse(&identifier, &document)?;
        tracing::debug!(
            identifier = %identifier,
            schema = self.parser.schema(),
            repositories = repositories.len(),
            "Resolved profile"
        );
        Ok(repositories)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("schema", &self.parser.schema())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
