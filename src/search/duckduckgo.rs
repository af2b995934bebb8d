use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    extractor::model::normalize_whitespace,
    fetcher::FetchSession,
    search::{SearchCandidate, SearchError, SearchProvider},
};

static RESULT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".result").unwrap());

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__a").unwrap());

static SNIPPET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__snippet").unwrap());

/// Scrapes DuckDuckGo's JavaScript-free HTML results page.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    endpoint: Url,
}

impl DuckDuckGoSearch {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    fn query_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    #[instrument(skip(self, session))]
    async fn search(
        &self,
        session: &FetchSession,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidRequest("empty query".to_string()));
        }

        let response = session.get(self.query_url(query).as_str()).await?;
        let candidates = parse_results(&response.body_utf8, &response.url_final, limit);

        debug!(found = candidates.len(), "search results parsed");
        Ok(candidates)
    }
}

/// Pull candidates out of a results page. Markup that does not match yields
/// an empty list rather than an error.
pub fn parse_results(html: &str, page_url: &Url, limit: usize) -> Vec<SearchCandidate> {
    let document = Html::parse_document(html);

    document
        .select(&RESULT_SELECTOR)
        .filter_map(|result| {
            let link = result.select(&LINK_SELECTOR).next()?;
            let href = link.value().attr("href")?;
            let url = resolve_result_url(href, page_url)?;
            let snippet = result
                .select(&SNIPPET_SELECTOR)
                .next()
                .map(|el| normalize_whitespace(&el.text().collect::<String>()))
                .unwrap_or_default();

            Some(SearchCandidate {
                url,
                title: normalize_whitespace(&link.text().collect::<String>()),
                snippet,
            })
        })
        .take(limit)
        .collect()
}

/// Result links are usually wrapped as
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
fn resolve_result_url(href: &str, page_url: &Url) -> Option<String> {
    let absolute = page_url.join(href.trim()).ok()?;

    let wrapped = absolute
        .query()
        .and_then(|query| query.split('&').find_map(|pair| pair.strip_prefix("uddg=")));

    match wrapped {
        Some(target) => Some(percent_decode_str(target).decode_utf8_lossy().into_owned()),
        None => Some(absolute.to_string()),
    }
}
