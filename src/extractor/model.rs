use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::fetcher::{FetchError, PageResponse};

/// Which optional facets to harvest from each page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub extract_links: bool,
    pub extract_images: bool,
}

impl ExtractOptions {
    pub fn new(extract_links: bool, extract_images: bool) -> Self {
        Self {
            extract_links,
            extract_images,
        }
    }

    /// Content only; used for search-derived pages and summaries.
    pub fn content_only() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub url: String,
    pub text: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Image {
    pub url: String,
    pub alt: String,
    pub title: String,
}

/// Best-effort response metadata; zero/empty when unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMetadata {
    pub status_code: u16,
    pub content_type: String,
    pub last_modified: String,
    pub final_url: String,
    pub charset: String,
}

impl PageMetadata {
    pub fn from_response(resp: &PageResponse) -> Self {
        Self {
            status_code: resp.status.as_u16(),
            content_type: resp.content_type.clone(),
            last_modified: resp.last_modified(),
            final_url: resp.url_final.to_string(),
            charset: resp.charset.to_string(),
        }
    }
}

/// Title, flattened text and optional harvests of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub content: String,
    pub word_count: usize,
    pub links: Option<Vec<Link>>,
    pub images: Option<Vec<Image>>,
}

/// Outcome for one requested URL.
///
/// `url` is always the URL the caller asked for; the post-redirect location
/// lives in `metadata.final_url`. `links` and `images` are `None` (and left
/// out of the JSON) when they were not requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageResult {
    pub url: String,
    #[schema(value_type = Option<Object>)]
    pub error: Option<FetchError>,
    pub title: Option<String>,
    pub content: String,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    pub metadata: PageMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl PageResult {
    pub fn extracted(url: impl Into<String>, page: ExtractedPage, metadata: PageMetadata) -> Self {
        Self {
            url: url.into(),
            error: None,
            title: page.title,
            word_count: count_words(&page.content),
            content: page.content,
            links: page.links,
            images: page.images,
            metadata,
            search_title: None,
            search_snippet: None,
            query: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: FetchError) -> Self {
        let metadata = PageMetadata {
            status_code: error.status().unwrap_or_default(),
            ..PageMetadata::default()
        };
        Self {
            url: url.into(),
            error: Some(error),
            title: None,
            content: String::new(),
            word_count: 0,
            links: None,
            images: None,
            metadata,
            search_title: None,
            search_snippet: None,
            query: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every whitespace run (newlines, tabs, the double-space
/// paragraph proxy) into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
