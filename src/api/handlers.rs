use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    api::dtos::{
        ErrorResponse, ScrapeRequest, SearchRequest, SearchResponse, SummaryQuery,
        SummaryResponse,
    },
    app_state::AppState,
    extractor::{ExtractOptions, PageResult},
    service::ScrapeError,
};

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

fn internal_error(err: ScrapeError) -> Response {
    error!("scrape service error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/v1/web/scrape",
    tag = "web",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "One result per requested URL, in request order", body = Vec<PageResult>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Scraper misconfigured", body = ErrorResponse)
    )
)]
pub async fn scrape(State(state): State<AppState>, Json(payload): Json<ScrapeRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let options = ExtractOptions::new(payload.extract_links, payload.extract_images);
    let max_pages = payload.max_pages;
    let urls = payload.url.into_vec();

    match state.service.extract_batch(&urls, max_pages, options).await {
        Ok(results) => Json(results).into_response(),
        Err(err) => internal_error(err),
    }
}

#[utoipa::path(
    post,
    path = "/v1/web/search",
    tag = "web",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Extracted search results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Scraper misconfigured", body = ErrorResponse)
    )
)]
pub async fn search(State(state): State<AppState>, Json(payload): Json<SearchRequest>) -> Response {
    if let Err(error) = payload.validate(state.service.config().max_pages()) {
        return bad_request(error);
    }

    match state
        .service
        .search_and_extract(&payload.query, payload.num_results)
        .await
    {
        Ok(results) => Json(SearchResponse {
            query: payload.query,
            total_found: results.len(),
            results,
        })
        .into_response(),
        Err(err) => internal_error(err),
    }
}

#[utoipa::path(
    get,
    path = "/v1/web/summary",
    tag = "web",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Short summary of the page", body = SummaryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Scraper misconfigured", body = ErrorResponse)
    )
)]
pub async fn summary(State(state): State<AppState>, Query(query): Query<SummaryQuery>) -> Response {
    if query.url.trim().is_empty() {
        return bad_request("URL cannot be empty".to_string());
    }

    match state.service.page_summary(&query.url).await {
        Ok(summary) => Json(SummaryResponse {
            url: query.url,
            summary,
        })
        .into_response(),
        Err(err) => internal_error(err),
    }
}
