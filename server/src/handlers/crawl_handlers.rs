use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};

use crawl_service_cli::render;
use crawl_service_cli::{CrawlRequest, CrawlResult, ExcludeTag, IncludeTag};

use crate::state::AppState;
use crate::views::{self, FormValues, Notice};

#[derive(Debug, Default, Deserialize)]
pub struct CrawlForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub include_tags: Vec<IncludeTag>,
    #[serde(default)]
    pub exclude_tags: Vec<ExcludeTag>,
}

/// GET /
pub async fn index() -> Html<String> {
    Html(views::page(&FormValues::defaults(), &Notice::None))
}

/// POST /crawl
pub async fn crawl_form(
    State(state): State<AppState>,
    Form(form): Form<CrawlForm>,
) -> Html<String> {
    let values = FormValues {
        url: &form.url,
        include: &form.include_tags,
        exclude: &form.exclude_tags,
    };

    // 1) validate before anything leaves the process
    let request = match CrawlRequest::new(
        &form.url,
        form.include_tags.iter().copied(),
        form.exclude_tags.iter().copied(),
    ) {
        Ok(r) => r,
        Err(e) => return Html(views::page(&values, &Notice::Validation(e.to_string()))),
    };

    // 2) single downstream call
    let outcome = state.crawler.crawl(request).await;
    let elapsed_secs = outcome.elapsed_secs();

    // 3) render, keeping the exports around for the download links
    let notice = match outcome.result {
        Ok(result) => {
            let rendered = render::render(&result, &outcome.request.url, outcome.requested_at);
            let result_id = state.store_exports(rendered.exports.clone());
            Notice::Success {
                elapsed_secs,
                rendered,
                result_id,
            }
        }
        Err(e) => Notice::Failure {
            message: e.to_string(),
            elapsed_secs,
        },
    };

    Html(views::page(&values, &notice))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlPayload {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub include_tags: Vec<IncludeTag>,
    #[serde(default)]
    pub exclude_tags: Vec<ExcludeTag>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CrawlResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/crawl
pub async fn crawl_json(
    State(state): State<AppState>,
    Json(payload): Json<CrawlPayload>,
) -> impl IntoResponse {
    let request = match CrawlRequest::new(
        &payload.url,
        payload.include_tags,
        payload.exclude_tags,
    ) {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CrawlResponse {
                    success: false,
                    elapsed_seconds: None,
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    };

    let outcome = state.crawler.crawl(request).await;
    let elapsed_seconds = Some(outcome.elapsed_secs());

    match outcome.result {
        Ok(data) => (
            StatusCode::OK,
            Json(CrawlResponse {
                success: true,
                elapsed_seconds,
                data: Some(data),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(CrawlResponse {
                success: false,
                elapsed_seconds,
                data: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

pub async fn health() -> &'static str {
    "ok"
}
