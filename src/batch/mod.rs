//! Concurrent fan-out of a URL list and positional fan-in of the results.

use std::{sync::Arc, time::Duration};

use tokio::{sync::Semaphore, task::JoinSet, time::sleep};
use tokio_util::{sync::CancellationToken, task::AbortOnDropHandle};
use tracing::{Instrument, debug, info, info_span, instrument, warn};
use uuid::Uuid;

use crate::{
    admission::UrlFilter,
    config::Config,
    extractor::{self, ExtractOptions, PageMetadata, PageResult},
    fetcher::{FetchError, FetchSession},
};

/// Runs one batch of URLs over one shared session.
///
/// Every capped input URL gets exactly one `PageResult`, in input order,
/// whatever happens to the individual fetches.
pub struct BatchOrchestrator {
    session: FetchSession,
    filter: Arc<UrlFilter>,
    max_pages: usize,
    max_concurrency: usize,
    deadline: Option<Duration>,
    cancel: CancellationToken,
}

impl BatchOrchestrator {
    pub fn new(session: FetchSession, filter: Arc<UrlFilter>, config: &Config) -> Self {
        Self {
            session,
            filter,
            max_pages: config.max_pages(),
            max_concurrency: config.max_concurrency(),
            deadline: config.batch_deadline(),
            cancel: CancellationToken::new(),
        }
    }

    /// Cancelling this token resolves every unfinished fetch as a timeout.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn session(&self) -> &FetchSession {
        &self.session
    }

    /// Release the session once the batch is done.
    pub fn close(self) {
        self.session.close();
    }

    #[instrument(skip_all, fields(batch_id = %Uuid::new_v4(), requested = urls.len()))]
    pub async fn run(
        &self,
        urls: &[String],
        max_pages: usize,
        options: ExtractOptions,
    ) -> Vec<PageResult> {
        let cap = max_pages.min(self.max_pages);
        let urls = &urls[..urls.len().min(cap)];
        if urls.is_empty() {
            return Vec::new();
        }

        let token = self.cancel.child_token();
        // Aborted when `run` returns or its future is dropped.
        let _deadline_timer = self.deadline.map(|deadline| arm_deadline(deadline, token.clone()));

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, url) in urls.iter().enumerate() {
            let session = self.session.clone();
            let filter = self.filter.clone();
            let semaphore = semaphore.clone();
            let token = token.clone();
            let url = url.clone();
            let span = info_span!("page", index, url = %url);

            tasks.spawn(
                async move {
                    let result = tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            PageResult::failed(url.clone(), FetchError::Timeout { url: url.clone() })
                        }
                        result = async {
                            // Held until the page is fully processed
                            let _permit = semaphore.acquire_owned().await.ok();
                            scrape_page(&session, &url, options, &filter).await
                        } => result,
                    };
                    (index, result)
                }
                .instrument(span),
            );
        }

        // Pre-sized slots keep input order regardless of completion order.
        let mut slots: Vec<Option<PageResult>> = vec![None; urls.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => warn!("page task failed: {}", e),
            }
        }

        let results: Vec<PageResult> = slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    PageResult::failed(
                        url.clone(),
                        FetchError::Network {
                            url: url.clone(),
                            cause: "page task failed".to_string(),
                        },
                    )
                })
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        info!(
            pages = results.len(),
            succeeded,
            failed = results.len() - succeeded,
            "batch complete"
        );
        results
    }
}

/// Cancel `token` once `deadline` elapses, unless the handle is dropped first.
fn arm_deadline(deadline: Duration, token: CancellationToken) -> AbortOnDropHandle<()> {
    AbortOnDropHandle::new(tokio::spawn(async move {
        sleep(deadline).await;
        warn!(?deadline, "batch deadline reached, cancelling outstanding fetches");
        token.cancel();
    }))
}

/// Fetch and extract one URL, folding any failure into the result.
pub async fn scrape_page(
    session: &FetchSession,
    url: &str,
    options: ExtractOptions,
    filter: &UrlFilter,
) -> PageResult {
    match session.get(url).await {
        Ok(response) => {
            let page = extractor::extract(&response, options, filter);
            debug!(
                status = %response.status,
                charset = %response.charset,
                words = page.word_count,
                "page extracted"
            );
            PageResult::extracted(url, page, PageMetadata::from_response(&response))
        }
        Err(error) => {
            warn!("failed to scrape {}: {}", url, error);
            PageResult::failed(url, error)
        }
    }
}
