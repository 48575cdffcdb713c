//! Configuration types for profile-scan

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};
use url::Url;

/// Remote fetch settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Host serving profile pages (default: "https://github.com/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Browser-identifying User-Agent header (default: "Mozilla/5.0")
    ///
    /// The remote host serves a different, non-parseable page to clients that do not
    /// identify as a browser.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (default: 10 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

/// Batch orchestration settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum rows resolved at the same time (default: 1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Deadline for the whole batch (None = no deadline)
    ///
    /// Rows still unresolved when the deadline passes are recorded as cancelled.
    #[serde(default, with = "optional_duration_serde")]
    pub deadline: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            deadline: None,
        }
    }
}

/// Retry configuration for transient fetch failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try (default: 0 = no retry)
    #[serde(default)]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 30 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// HTTP shim settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind the API server to (default: 127.0.0.1:8000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Serve Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for profile-scan
///
/// Every section has working defaults, so `Config::default()` reproduces the reference
/// behaviour: sequential rows, a 10 second timeout and no retries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Batch orchestration settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Retry policy for transient fetch failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// HTTP shim settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.fetch.timeout.is_zero() {
            return Err(Error::config("fetch.timeout", "timeout must be non-zero"));
        }
        check_at_most("fetch.timeout", self.fetch.timeout, MAX_DELAY)?;

        if let Some(deadline) = self.batch.deadline {
            check_at_most("batch.deadline", deadline, MAX_DEADLINE)?;
        }

        if self.batch.concurrency == 0 {
            return Err(Error::config(
                "batch.concurrency",
                "concurrency must be at least 1",
            ));
        }

        let multiplier = self.retry.backoff_multiplier;
        if !(1.0..=MAX_BACKOFF_MULTIPLIER).contains(&multiplier) {
            return Err(Error::config(
                "retry.backoff_multiplier",
                format!("must be between 1.0 and {MAX_BACKOFF_MULTIPLIER}, got {multiplier}"),
            ));
        }
        check_at_most("retry.initial_delay", self.retry.initial_delay, MAX_DELAY)?;
        check_at_most("retry.max_delay", self.retry.max_delay, MAX_DELAY)?;

        Ok(())
    }

    /// Parsed base URL, normalised to end with a slash so identifiers join as a path segment
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.fetch.base_url).map_err(|e| {
            Error::config(
                "fetch.base_url",
                format!("invalid base URL '{}': {}", self.fetch.base_url, e),
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(
                "fetch.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(url)
    }
}

/// Upper bound for the request timeout and retry delays (one day)
const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound for the batch deadline (one year)
const MAX_DEADLINE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Upper bound for the retry backoff multiplier
const MAX_BACKOFF_MULTIPLIER: f64 = 100.0;

fn check_at_most(key: &str, value: Duration, max: Duration) -> Result<()> {
    if value > max {
        return Err(Error::config(
            key,
            format!("must be at most {} seconds, got {}", max.as_secs(), value.as_secs()),
        ));
    }
    Ok(())
}

fn default_base_url() -> String {
    "https://github.com/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_concurrency() -> usize {
    1
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
