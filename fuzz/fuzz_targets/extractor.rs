#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use webharvest::admission::UrlFilter;
use webharvest::extractor::{ExtractOptions, extract_html};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let page_url = Url::parse("https://example.com/a/b").unwrap();

    // Extraction must never panic, whatever the markup
    let page = extract_html(
        &html,
        &page_url,
        ExtractOptions::new(true, true),
        &UrlFilter::default(),
    );
    assert_eq!(page.word_count, page.content.split_whitespace().count());
});
