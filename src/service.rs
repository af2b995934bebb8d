//! The pipeline's public entry points.
//!
//! Each call opens its own [`FetchSession`], so concurrent callers never
//! share timeout or identity policy, and closes it before returning.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use crate::{
    admission::UrlFilter,
    batch::BatchOrchestrator,
    config::{Config, ConfigError},
    extractor::{ExtractOptions, PageResult, summary},
    fetcher::{FetchError, FetchSession, SessionError},
    search::{self, DuckDuckGoSearch, SearchProvider},
};

/// Contract violations only. Remote failures are reported inside each
/// `PageResult`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid scraper configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone)]
pub struct ScrapeService {
    config: Config,
    filter: Arc<UrlFilter>,
    search: Arc<dyn SearchProvider>,
}

impl ScrapeService {
    /// Service with the default filter and the configured DuckDuckGo endpoint.
    pub fn new(config: Config) -> Self {
        let search = Arc::new(DuckDuckGoSearch::new(config.search_endpoint().clone()));
        Self {
            config,
            filter: Arc::new(UrlFilter::default()),
            search,
        }
    }

    pub fn with_filter(mut self, filter: UrlFilter) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_search_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search = provider;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn orchestrator(&self) -> Result<BatchOrchestrator, ScrapeError> {
        self.config.validate()?;
        let session = FetchSession::open(&self.config)?;
        Ok(BatchOrchestrator::new(
            session,
            self.filter.clone(),
            &self.config,
        ))
    }

    #[instrument(skip(self))]
    pub async fn extract(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<PageResult, ScrapeError> {
        let orchestrator = self.orchestrator()?;
        let mut results = orchestrator.run(&[url.to_string()], 1, options).await;
        orchestrator.close();

        // A one-element batch always yields one result.
        Ok(results.pop().unwrap_or_else(|| {
            PageResult::failed(
                url,
                FetchError::Network {
                    url: url.to_string(),
                    cause: "no result produced".to_string(),
                },
            )
        }))
    }

    #[instrument(skip(self, urls), fields(url_count = urls.len()))]
    pub async fn extract_batch(
        &self,
        urls: &[String],
        max_pages: usize,
        options: ExtractOptions,
    ) -> Result<Vec<PageResult>, ScrapeError> {
        let orchestrator = self.orchestrator()?;
        let results = orchestrator.run(urls, max_pages, options).await;
        orchestrator.close();
        Ok(results)
    }

    #[instrument(skip(self))]
    pub async fn search_and_extract(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<PageResult>, ScrapeError> {
        let orchestrator = self.orchestrator()?;
        let results = search::compose(
            self.search.as_ref(),
            &orchestrator,
            &self.filter,
            query,
            num_results,
        )
        .await;
        orchestrator.close();
        Ok(results)
    }

    /// A few leading sentences of the page, or a one-line explanation of why
    /// there are none.
    pub async fn page_summary(&self, url: &str) -> Result<String, ScrapeError> {
        let result = self.extract(url, ExtractOptions::content_only()).await?;
        Ok(summary::summarize(&result))
    }
}
