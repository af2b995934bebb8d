pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    extractor::{Image, Link, PageMetadata, PageResult},
    health,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        handlers::scrape,
        handlers::search,
        handlers::summary
    ),
    components(schemas(
        PageResult,
        PageMetadata,
        Link,
        Image,
        dtos::UrlInput,
        dtos::ScrapeRequest,
        dtos::SearchRequest,
        dtos::SearchResponse,
        dtos::SummaryResponse,
        dtos::ErrorResponse,
        health::HealthResponse
    )),
    tags(
        (name = "web", description = "Page extraction and web search"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/v1/web/scrape", post(handlers::scrape))
        .route("/v1/web/search", post(handlers::search))
        .route("/v1/web/summary", get(handlers::summary))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
