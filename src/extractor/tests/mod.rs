use chrono::Utc;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fs;
use url::Url;

use crate::admission::UrlFilter;
use crate::extractor::{ExtractOptions, extract};
use crate::fetcher::types::{Charset, PageResponse};

#[test]
fn test_extract_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://example.com/news/sample");
    let page = extract(
        &response,
        ExtractOptions::new(true, true),
        &UrlFilter::default(),
    );

    assert_eq!(page.title.as_deref(), Some("Sample Article - News Site"));
    assert!(page.content.starts_with("Sample Article This is the first paragraph"));
    assert!(page.content.contains("second paragraph"));
    assert!(!page.content.contains("trackRead"));
    assert!(!page.content.contains("Trending now"));
    assert!(!page.content.contains("Copyright"));
    assert_eq!(page.word_count, page.content.split_whitespace().count());

    // Header, nav and footer links are stripped with the boilerplate; the
    // share link and the PDF are not admissible.
    let links = page.links.expect("links requested");
    let urls: Vec<_> = links.iter().map(|link| link.url.as_str()).collect();
    assert_eq!(urls, ["https://example.com/related"]);
    assert_eq!(links[0].title, "Related story");
    assert_eq!(links[0].text, "related story");

    let images = page.images.expect("images requested");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].url, "https://example.com/images/sample.jpg");
    assert_eq!(images[0].alt, "A sample image");
}

#[test]
fn test_extract_blog_post() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/blog.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://blog.example.com/post");
    let page = extract(&response, ExtractOptions::content_only(), &UrlFilter::default());

    assert_eq!(
        page.title.as_deref(),
        Some("How to Build Better Software | Tech Blog")
    );
    assert!(page.content.contains("Building better software"));
    assert!(page.content.contains("Key Principles"));
    assert!(page.content.contains("Keep functions small Test behaviour"));
    assert!(!page.content.contains("Archive"));
    assert!(!page.content.contains("No comments"));
    assert!(page.links.is_none());
    assert!(page.images.is_none());
}

#[test]
fn test_links_requested_on_page_without_anchors() {
    let html = "<html><body><p>Nothing to follow here.</p></body></html>".to_string();

    let response = create_test_response(html, "https://example.com/plain");
    let page = extract(
        &response,
        ExtractOptions::new(true, false),
        &UrlFilter::default(),
    );

    assert_eq!(page.links, Some(Vec::new()));
    assert!(page.images.is_none());
}

#[test]
fn test_links_resolve_against_final_url() {
    let html = r#"<html><body><p><a href="next">Next page</a></p></body></html>"#.to_string();

    let response = create_test_response(html, "https://example.com/moved/here");
    let page = extract(
        &response,
        ExtractOptions::new(true, false),
        &UrlFilter::default(),
    );

    assert_eq!(
        page.links.unwrap()[0].url,
        "https://example.com/moved/next"
    );
}

#[test]
fn test_malformed_html() {
    let html =
        "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content".to_string();

    let response = create_test_response(html, "https://example.com/broken");
    let page = extract(&response, ExtractOptions::content_only(), &UrlFilter::default());

    assert_eq!(page.title.as_deref(), Some("Broken"));
    assert_eq!(page.content, "Unclosed tags More content");
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        content_type: "text/html; charset=utf-8".to_string(),
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/[a-z/]*"
        ) {
            let response = create_test_response(html, &url);
            let _ = extract(&response, ExtractOptions::new(true, true), &UrlFilter::default());
        }

        #[test]
        fn test_word_count_matches_content(html in ".*") {
            let response = create_test_response(html, "https://example.com");
            let page = extract(&response, ExtractOptions::content_only(), &UrlFilter::default());
            prop_assert_eq!(page.word_count, page.content.split_whitespace().count());
            prop_assert!(!page.content.contains("  "));
        }
    }
}
