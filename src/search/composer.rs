use tracing::{info, instrument, warn};

use crate::{
    admission::{UrlFilter, host_matches_any},
    batch::BatchOrchestrator,
    extractor::{ExtractOptions, PageResult},
    search::{SearchCandidate, SearchProvider},
};

/// Video and social hosts dropped from search results on top of the
/// admissibility filter's own exclusions.
pub const ALWAYS_EXCLUDED_HOSTS: &[&str] = &["youtube.com", "facebook.com", "twitter.com"];

/// Search, pick up to `num_results` followable candidates, extract them and
/// attach the search title/snippet/query to each result.
///
/// Search is best effort: an unreachable or unparseable search surface
/// yields an empty list.
#[instrument(skip(provider, orchestrator, filter))]
pub async fn compose(
    provider: &dyn SearchProvider,
    orchestrator: &BatchOrchestrator,
    filter: &UrlFilter,
    query: &str,
    num_results: usize,
) -> Vec<PageResult> {
    if num_results == 0 {
        return Vec::new();
    }

    // Over-fetch so filtering still leaves enough candidates.
    let candidates = match provider
        .search(orchestrator.session(), query, num_results.saturating_mul(2))
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("search failed for {:?}: {}", query, e);
            return Vec::new();
        }
    };

    let selected = select_candidates(candidates, filter, num_results);
    if selected.is_empty() {
        warn!("no usable search results for {:?}", query);
        return Vec::new();
    }

    let urls: Vec<String> = selected.iter().map(|c| c.url.clone()).collect();
    let mut results = orchestrator
        .run(&urls, urls.len(), ExtractOptions::content_only())
        .await;

    for (result, candidate) in results.iter_mut().zip(selected) {
        result.search_title = Some(candidate.title);
        result.search_snippet = Some(candidate.snippet);
        result.query = Some(query.to_string());
    }

    info!(results = results.len(), "search and extract complete");
    results
}

/// Admissible candidates, minus the always-excluded hosts, truncated to
/// `limit`, in ranking order.
pub fn select_candidates(
    candidates: Vec<SearchCandidate>,
    filter: &UrlFilter,
    limit: usize,
) -> Vec<SearchCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| filter.is_admissible(&candidate.url))
        .filter(|candidate| !is_always_excluded(&candidate.url))
        .take(limit)
        .collect()
}

fn is_always_excluded(url: &str) -> bool {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host_matches_any(host, ALWAYS_EXCLUDED_HOSTS)))
        .unwrap_or(true)
}
