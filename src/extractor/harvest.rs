use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::{
    admission::UrlFilter,
    extractor::{
        model::{Image, Link, normalize_whitespace},
        reader::select_attached,
    },
};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());

static BASE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("base[href]").unwrap());

/// Base for relative references: `<base href>` when present, else the page
/// URL.
pub fn base_url(document: &Html, page_url: &Url) -> Url {
    select_attached(document, &BASE_SELECTOR)
        .next()
        .and_then(|base| base.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Admissible outbound links in document order. Duplicates are kept.
pub fn harvest_links(document: &Html, base: &Url, filter: &UrlFilter) -> Vec<Link> {
    select_attached(document, &ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let absolute = base.join(href.trim()).ok()?;
            if !filter.admits(&absolute) {
                return None;
            }
            Some(Link {
                url: absolute.to_string(),
                text: normalize_whitespace(&anchor.text().collect::<String>()),
                title: anchor.value().attr("title").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Every image with a resolvable `src`. Images are not followed, so the
/// admissibility filter does not apply.
pub fn harvest_images(document: &Html, base: &Url) -> Vec<Image> {
    select_attached(document, &IMAGE_SELECTOR)
        .filter_map(|img| {
            let src = img.value().attr("src")?;
            let absolute = base.join(src.trim()).ok()?;
            Some(Image {
                url: absolute.to_string(),
                alt: img.value().attr("alt").unwrap_or_default().to_string(),
                title: img.value().attr("title").unwrap_or_default().to_string(),
            })
        })
        .collect()
}
