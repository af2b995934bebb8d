use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-URL failure. Always carried as data inside a `PageResult`, never
/// propagated past the batch boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error for {url}: {cause}")]
    Network { url: String, cause: String },

    #[error("timeout fetching {url}")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("body too large ({size} bytes) at {url}")]
    BodyTooLarge { url: String, size: u64 },

    #[error("unsupported content-type {content_type} at {url}")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("could not parse {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl FetchError {
    /// Whether a caller-side retry has a reasonable chance of succeeding.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::InvalidUrl { .. } => false,
            Self::BodyTooLarge { .. } => false,
            Self::UnsupportedContentType { .. } => false,
            Self::Parse { .. } => false,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,

            Self::Network { .. } => true,
            Self::Timeout { .. } => true,
        }
    }

    /// The URL this failure belongs to.
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::HttpStatus { url, .. }
            | Self::BodyTooLarge { url, .. }
            | Self::UnsupportedContentType { url, .. }
            | Self::Parse { url, .. } => url,
        }
    }

    /// HTTP status attached to the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn from_reqwest_error(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if let Some(status) = err.status() {
            Self::HttpStatus {
                url,
                status: status.as_u16(),
            }
        } else if err.is_redirect() {
            Self::Network {
                url,
                cause: "too many redirects".to_string(),
            }
        } else if err.is_decode() || err.is_body() {
            Self::Parse {
                url,
                reason: describe(&err),
            }
        } else {
            // DNS, connect, TLS
            Self::Network {
                url,
                cause: describe(&err),
            }
        }
    }
}

/// reqwest's top-level message is terse ("error sending request"); the
/// source chain carries the DNS/connect detail.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
