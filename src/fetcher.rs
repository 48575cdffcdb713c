//! Remote retrieval of profile repository pages

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::types::{Identifier, RawDocument};
use async_trait::async_trait;
use url::Url;

/// Source of profile pages
///
/// [`HttpFetcher`] is the production implementation. Tests and embedders can supply
/// their own to resolve against canned documents.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the repository listing page for `identifier`
    ///
    /// Makes at most one outbound request; retrying is the caller's decision.
    async fn fetch(&self, identifier: &Identifier) -> std::result::Result<RawDocument, FetchError>;
}

/// Fetches profile pages over HTTP(S)
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher from the `fetch` section of the configuration
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = reqwest::Client::builder()
            .timeout(config.fetch.timeout)
            .user_agent(config.fetch.user_agent.clone())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Target URL for an identifier: `<base>/<identifier>?tab=repositories`
    pub fn locator(&self, identifier: &Identifier) -> std::result::Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(identifier.as_str())
            .map_err(|e| FetchError::Transport {
                detail: format!("cannot build URL for '{}': {}", identifier, e),
            })?;
        url.query_pairs_mut().append_pair("tab", "repositories");
        Ok(url)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, identifier: &Identifier) -> std::result::Result<RawDocument, FetchError> {
        let url = self.locator(identifier)?;
        tracing::debug!(identifier = %identifier, url = %url, "Fetching profile page");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(
            identifier = %identifier,
            bytes = body.len(),
            "Fetched profile page"
        );

        Ok(RawDocument::new(url.to_string(), body))
    }
}
