use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crawl_service_cli::render::ExportKind;

use crate::state::AppState;

/// GET /download/{id}/{kind}
pub async fn download(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Response {
    let Some(kind) = ExportKind::from_slug(&kind) else {
        return (StatusCode::NOT_FOUND, "Unknown export").into_response();
    };

    match state.export(&id, kind) {
        Some(export) => (
            [
                (
                    header::CONTENT_TYPE,
                    format!("{}; charset=utf-8", kind.mime()),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.file_name),
                ),
            ],
            export.content,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Result not found or expired").into_response(),
    }
}
