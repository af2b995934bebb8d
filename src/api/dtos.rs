use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::extractor::PageResult;

/// A single URL or a list of them.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UrlInput {
    One(String),
    Many(Vec<String>),
}

impl UrlInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(url) => vec![url],
            Self::Many(urls) => urls,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScrapeRequest {
    pub url: UrlInput,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_true")]
    pub extract_links: bool,
    #[serde(default)]
    pub extract_images: bool,
}

impl ScrapeRequest {
    pub fn validate(&self) -> Result<(), String> {
        let empty = match &self.url {
            UrlInput::One(url) => url.trim().is_empty(),
            UrlInput::Many(urls) => urls.is_empty(),
        };
        if empty {
            return Err("At least one URL is required".to_string());
        }
        if self.max_pages == 0 {
            return Err("max_pages must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

impl SearchRequest {
    /// `max_results` is the per-batch page cap of the running service.
    pub fn validate(&self, max_results: usize) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if self.num_results > max_results {
            return Err(format!("num_results must be at most {max_results}"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<PageResult>,
    pub total_found: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryQuery {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn default_max_pages() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_num_results() -> usize {
    3
}
