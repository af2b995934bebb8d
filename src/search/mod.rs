//! Search-driven extraction.
//!
//! A [`SearchProvider`] turns a query into ranked [`SearchCandidate`]s; the
//! [`composer`] filters those and hands them to the batch orchestrator.

pub mod composer;
pub mod duckduckgo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetcher::{FetchError, FetchSession};

pub use composer::compose;
pub use duckduckgo::DuckDuckGoSearch;

/// One ranked hit from a search surface, before extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Anything that can answer a free-text query with ranked URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return at most `limit` candidates, best first. Requests go through the
    /// caller's session so they share its timeout and identity.
    async fn search(
        &self,
        session: &FetchSession,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, SearchError>;
}
