#![allow(dead_code)]

use std::time::Duration;

use webharvest::config::Config;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Config with short timeouts so failure tests finish quickly.
pub fn test_config() -> Config {
    Config::default()
        .with_timeout(Duration::from_secs(2))
        .with_max_pages(10)
        .with_max_concurrency(10)
}

pub fn html_page(title: &str, body: &str) -> String {
    format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
}

pub fn html_response(html: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_bytes(html.into_bytes())
        .insert_header("Content-Type", "text/html; charset=utf-8")
}

/// Serve `html` at `route` on `server`.
pub async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(html))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve a page that only answers after `delay`.
pub async fn mount_slow_page(server: &MockServer, route: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(html_page("Slow", "<p>Too late</p>")).set_delay(delay))
        .mount(server)
        .await;
}
