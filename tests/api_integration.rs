mod helpers;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use helpers::{html_page, mount_page, test_config};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;
use webharvest::{api, app_state::AppState, service::ScrapeService};
use wiremock::MockServer;

fn app(server: &MockServer) -> Router {
    let endpoint = Url::parse(&format!("{}/html/", server.uri())).unwrap();
    let service = ScrapeService::new(test_config().with_search_endpoint(endpoint));
    api::router(AppState::new(service))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn test_scrape_single_url() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/article",
        html_page(
            "Article",
            r#"<nav>Menu</nav><article><p>Body of the <a href="/more">article</a>.</p></article>"#,
        ),
    )
    .await;
    let url = format!("{}/article", mock_server.uri());

    let response = app(&mock_server)
        .oneshot(post_json("/v1/web/scrape", json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);

    let page = &results[0];
    assert_eq!(page["url"], url);
    assert_eq!(page["error"], Value::Null);
    assert_eq!(page["title"], "Article");
    assert_eq!(page["content"], "Body of the article.");
    assert_eq!(page["word_count"], 4);
    assert_eq!(page["links"][0]["text"], "article");
    assert!(page.get("images").is_none());
    assert_eq!(page["metadata"]["status_code"], 200);
}

#[tokio::test]
async fn test_scrape_url_list_reports_failures_inline() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/ok", html_page("Ok", "<main><p>Fine.</p></main>")).await;

    let urls = vec![
        format!("{}/ok", mock_server.uri()),
        format!("{}/missing", mock_server.uri()),
    ];
    let response = app(&mock_server)
        .oneshot(post_json(
            "/v1/web/scrape",
            json!({ "url": urls, "max_pages": 5, "extract_links": false }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["error"], Value::Null);
    assert!(results[0].get("links").is_none());

    assert_eq!(results[1]["url"], urls[1]);
    assert_eq!(results[1]["error"]["kind"], "http_status");
    assert_eq!(results[1]["error"]["status"], 404);
    assert_eq!(results[1]["content"], "");
}

#[tokio::test]
async fn test_scrape_rejects_empty_url_list() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(post_json("/v1/web/scrape", json!({ "url": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("URL"));
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(post_json("/v1/web/search", json!({ "query": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_rejects_result_count_above_page_cap() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(post_json(
            "/v1/web/search",
            json!({ "query": "rust", "num_results": u64::MAX }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "num_results must be at most 10");
}

#[tokio::test]
async fn test_search_with_unreachable_provider_returns_no_results() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(post_json(
            "/v1/web/search",
            json!({ "query": "rust", "num_results": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["query"], "rust");
    assert_eq!(body["total_found"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_summary_of_page() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/story",
        html_page(
            "Story",
            "<main><p>First sentence. Second sentence. Third sentence. Fourth sentence.</p></main>",
        ),
    )
    .await;
    let url = format!("{}/story", mock_server.uri());

    let response = app(&mock_server)
        .oneshot(
            Request::builder()
                .uri(format!("/v1/web/summary?url={url}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["url"], url);
    assert_eq!(
        body["summary"],
        "**Story**\n\nFirst sentence. Second sentence. Third sentence"
    );
}

#[tokio::test]
async fn test_summary_of_missing_page_explains_failure() {
    let mock_server = MockServer::start().await;
    let url = format!("{}/gone", mock_server.uri());

    let response = app(&mock_server)
        .oneshot(
            Request::builder()
                .uri(format!("/v1/web/summary?url={url}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let summary = body["summary"].as_str().unwrap();
    assert!(summary.starts_with(&format!("Unable to access {url}")));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"].get("/v1/web/scrape").is_some());
    assert!(body["paths"].get("/v1/web/search").is_some());
    assert!(body["paths"].get("/v1/web/summary").is_some());
}
