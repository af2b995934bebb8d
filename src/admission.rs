//! Decides whether a URL is worth following.
//!
//! The same [`UrlFilter`] instance is consulted when harvesting links from a
//! page and when picking candidates out of a search result list, so both
//! paths apply one policy.

use url::Url;

/// Documents, spreadsheets, presentations, archives and executables.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".rar", ".7z", ".tar",
    ".gz", ".exe", ".msi", ".dmg",
];

/// Platforms whose markup is gated or unsuitable for generic text extraction.
pub const DEFAULT_EXCLUDED_DOMAINS: &[&str] =
    &["facebook.com", "twitter.com", "instagram.com", "tiktok.com"];

#[derive(Debug, Clone)]
pub struct UrlFilter {
    excluded_extensions: Vec<String>,
    excluded_domains: Vec<String>,
}

impl UrlFilter {
    pub fn new<E, D>(excluded_extensions: E, excluded_domains: D) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            excluded_extensions: excluded_extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_ascii_lowercase())
                .collect(),
            excluded_domains: excluded_domains
                .into_iter()
                .map(|domain| domain.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_admissible(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.admits(&parsed),
            Err(_) => false,
        }
    }

    pub fn admits(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };

        let path = url.path().to_ascii_lowercase();
        if self
            .excluded_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            return false;
        }

        !host_matches_any(host, &self.excluded_domains)
    }
}

impl Default for UrlFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_EXTENSIONS, DEFAULT_EXCLUDED_DOMAINS)
    }
}

/// True when `host` is one of `domains` or a subdomain of one.
pub fn host_matches_any<S: AsRef<str>>(host: &str, domains: &[S]) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    domains.iter().any(|domain| {
        let domain = domain.as_ref();
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
