//! Concurrent web page extraction.
//!
//! Fetch one or many URLs (or the results of a web search) under a shared
//! session policy, strip boilerplate, flatten the main text and optionally
//! harvest links and images. Per-URL failures come back as data; a batch
//! always yields one [`PageResult`] per requested URL, in request order.

pub mod admission;
pub mod api;
pub mod app_state;
pub mod batch;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod search;
pub mod service;
pub mod telemetry;

pub use admission::UrlFilter;
pub use batch::BatchOrchestrator;
pub use config::Config;
pub use extractor::{ExtractOptions, Image, Link, PageMetadata, PageResult};
pub use fetcher::{FetchError, FetchSession};
pub use search::{SearchCandidate, SearchProvider};
pub use service::{ScrapeError, ScrapeService};
