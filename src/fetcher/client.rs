use crate::{
    config::Config,
    fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse},
};
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MAX_REDIRECTS: usize = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Network policy for one batch: a pooled client plus its timeout and
/// identity.
///
/// Clones share the connection pool, so per-URL tasks each hold a clone and
/// the pool is released once the last one is dropped. `close` makes the end
/// of a batch explicit; dropping the session on any other path (early
/// return, panic unwinding) releases the same resources.
#[derive(Debug, Clone)]
pub struct FetchSession {
    client: Client,
    timeout: Duration,
    user_agent: String,
}

impl FetchSession {
    pub fn open(config: &Config) -> Result<Self, SessionError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_HTML));

        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout()))
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .default_headers(headers)
            .build()?;

        debug!(timeout = ?config.timeout(), "fetch session opened");
        Ok(Self {
            client,
            timeout: config.timeout(),
            user_agent: config.user_agent().to_string(),
        })
    }

    pub fn close(self) {
        debug!("fetch session closed");
        drop(self);
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Issue a single GET. Every failure mode comes back as a `FetchError`
    /// value; nothing here retries.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<PageResponse, FetchError> {
        let parsed_url = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge {
                url: url.to_string(),
                size: content_length,
            });
        }

        let final_url = response.url().clone();
        let headers = response.headers().clone();

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !is_html(&content_type) {
            return Err(FetchError::UnsupportedContentType {
                url: url.to_string(),
                content_type,
            });
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest_error(url, e))?;

        // Content-Length may be missing or wrong
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge {
                url: url.to_string(),
                size: body_bytes.len() as u64,
            });
        }

        process_response(final_url, status, headers, body_bytes, &content_type).map_err(|err| {
            match err {
                // Report against the requested URL, not the redirect target.
                FetchError::Parse { reason, .. } => FetchError::Parse {
                    url: url.to_string(),
                    reason,
                },
                other => other,
            }
        })
    }
}

fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml")
}
