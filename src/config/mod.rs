//! Configuration handling for the scraper.
//!
//! Everything is read from environment variables with development defaults.
//! `Config::from_env` validates the values so that a malformed setting is
//! reported once at startup instead of surfacing as odd per-page failures.

use std::env;
use std::time::Duration;

use reqwest::header::HeaderValue;
use thiserror::Error;
use url::Url;

/// Environment variable names.
pub const ENV_MAX_SCRAPE_PAGES: &str = "MAX_SCRAPE_PAGES";
pub const ENV_SCRAPE_TIMEOUT: &str = "SCRAPE_TIMEOUT";
pub const ENV_SCRAPE_USER_AGENT: &str = "SCRAPE_USER_AGENT";
pub const ENV_SCRAPE_MAX_CONCURRENCY: &str = "SCRAPE_MAX_CONCURRENCY";
pub const ENV_SCRAPE_BATCH_DEADLINE: &str = "SCRAPE_BATCH_DEADLINE";
pub const ENV_SEARCH_ENDPOINT: &str = "SEARCH_ENDPOINT";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

const DEFAULT_MAX_PAGES: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Browser-like identity; several common targets block obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Runtime configuration for sessions, batches and the HTTP front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    max_pages: usize,
    timeout: Duration,
    user_agent: String,
    max_concurrency: usize,
    batch_deadline: Option<Duration>,
    search_endpoint: Url,
    bind_addr: String,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_pages = parse_var(ENV_MAX_SCRAPE_PAGES, "max_pages")?.unwrap_or(DEFAULT_MAX_PAGES);
        let timeout_secs =
            parse_var(ENV_SCRAPE_TIMEOUT, "timeout")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let user_agent =
            env::var(ENV_SCRAPE_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let max_concurrency =
            parse_var(ENV_SCRAPE_MAX_CONCURRENCY, "max_concurrency")?.unwrap_or(max_pages);
        let batch_deadline = parse_var::<u64>(ENV_SCRAPE_BATCH_DEADLINE, "batch_deadline")?
            .map(Duration::from_secs);
        let search_endpoint = match env::var(ENV_SEARCH_ENDPOINT) {
            Ok(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                field: "search_endpoint",
                reason: e.to_string(),
            })?,
            Err(_) => default_search_endpoint(),
        };
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self::default()
            .with_max_pages(max_pages)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_user_agent(user_agent)
            .with_max_concurrency(max_concurrency)
            .with_batch_deadline(batch_deadline)
            .with_search_endpoint(search_endpoint)
            .with_bind_addr(bind_addr)
            .validated()
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_batch_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.batch_deadline = deadline;
        self
    }

    pub fn with_search_endpoint(mut self, endpoint: Url) -> Self {
        self.search_endpoint = endpoint;
        self
    }

    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }

    /// Check the invariants the pipeline relies on.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pages == 0 {
            return Err(ConfigError::invalid("max_pages", "must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid("timeout", "must be at least 1 second"));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::invalid("max_concurrency", "must be at least 1"));
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigError::invalid(
                "user_agent",
                "not a valid header value",
            ));
        }
        if self.search_endpoint.host_str().is_none() {
            return Err(ConfigError::invalid("search_endpoint", "missing host"));
        }
        Ok(())
    }

    /// Maximum number of pages processed per batch.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
    /// Total per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    /// Outbound `User-Agent`.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Maximum number of fetches in flight within one batch.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
    pub fn batch_deadline(&self) -> Option<Duration> {
        self.batch_deadline
    }
    pub fn search_endpoint(&self) -> &Url {
        &self.search_endpoint
    }
    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: DEFAULT_MAX_PAGES,
            batch_deadline: None,
            search_endpoint: default_search_endpoint(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

fn default_search_endpoint() -> Url {
    Url::parse(DEFAULT_SEARCH_ENDPOINT).expect("default search endpoint is a valid URL")
}

fn parse_var<T: std::str::FromStr>(
    key: &str,
    field: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::invalid(field, e.to_string())),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
