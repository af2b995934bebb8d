pub mod harvest;
pub mod model;
pub mod reader;
pub mod summary;

#[cfg(test)]
mod tests;

pub use model::{ExtractOptions, ExtractedPage, Image, Link, PageMetadata, PageResult};

use url::Url;

use crate::{admission::UrlFilter, fetcher::types::PageResponse};

/// Turn a fetched page into title, text and the requested harvests.
pub fn extract(resp: &PageResponse, options: ExtractOptions, filter: &UrlFilter) -> ExtractedPage {
    extract_html(&resp.body_utf8, &resp.url_final, options, filter)
}

/// Synchronous on purpose: `scraper::Html` is `!Send` and must never live
/// across an `.await` in the per-URL tasks.
pub fn extract_html(
    html: &str,
    page_url: &Url,
    options: ExtractOptions,
    filter: &UrlFilter,
) -> ExtractedPage {
    // 1. Parse and strip boilerplate
    let document = reader::parse(html);

    // 2. Title and main text
    let read = reader::read(&document);

    // 3. Optional harvests over the stripped document
    let base = harvest::base_url(&document, page_url);
    let links = options
        .extract_links
        .then(|| harvest::harvest_links(&document, &base, filter));
    let images = options
        .extract_images
        .then(|| harvest::harvest_images(&document, &base));

    ExtractedPage {
        title: read.title,
        content: read.content,
        word_count: read.word_count,
        links,
        images,
    }
}
