//! Session handlers: lifecycle, text and image actions, downloads.

use super::{ClearRequest, DownloadLinkResponse, EditTextRequest, SelectLanguageRequest};
use crate::api::AppState;
use crate::error::ApiError;
use crate::types::{SessionId, UploadedAsset};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// MIME type assumed when the client sends none
const DEFAULT_UPLOAD_MIME: &str = "application/octet-stream";

fn ok_json<T: serde::Serialize>(result: crate::Result<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /sessions - Start a session
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "sessions",
    responses(
        (status = 201, description = "Session created", body = crate::session::SessionView)
    )
)]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::CREATED, Json(state.app.create_session().await))
}

/// GET /sessions/:id - Current session state
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = crate::session::SessionView),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn get_session(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    ok_json(state.app.session(SessionId(id)).await)
}

/// DELETE /sessions/:id - End a session
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn end_session(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.app.end_session(SessionId(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /sessions/:id/text - Replace a text area
#[utoipa::path(
    put,
    path = "/sessions/{id}/text",
    tag = "text",
    params(("id" = i64, Path, description = "Session ID")),
    request_body = EditTextRequest,
    responses(
        (status = 200, description = "Text updated", body = crate::session::SessionView),
        (status = 400, description = "Text exceeds the character limit", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn edit_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<EditTextRequest>,
) -> Response {
    ok_json(
        state
            .app
            .edit_text(SessionId(id), request.field, request.text)
            .await,
    )
}

/// PUT /sessions/:id/language - Pick the target language
#[utoipa::path(
    put,
    path = "/sessions/{id}/language",
    tag = "text",
    params(("id" = i64, Path, description = "Session ID")),
    request_body = SelectLanguageRequest,
    responses(
        (status = 200, description = "Language updated", body = crate::session::SessionView),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn select_language(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SelectLanguageRequest>,
) -> Response {
    ok_json(
        state
            .app
            .select_language(SessionId(id), request.language)
            .await,
    )
}

/// POST /sessions/:id/translate - Translate the input text
#[utoipa::path(
    post,
    path = "/sessions/{id}/translate",
    tag = "text",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Translation result with an optional download link", body = crate::app::TranslationResult),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 500, description = "Download icon missing", body = ApiError)
    )
)]
pub async fn translate(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    ok_json(state.app.translate(SessionId(id)).await)
}

/// POST /sessions/:id/clear - Empty text areas
#[utoipa::path(
    post,
    path = "/sessions/{id}/clear",
    tag = "text",
    params(("id" = i64, Path, description = "Session ID")),
    request_body(content = ClearRequest, description = "Fields to clear; an empty body clears both"),
    responses(
        (status = 200, description = "Fields cleared", body = crate::session::SessionView),
        (status = 400, description = "Body is not a valid clear request", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn clear(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ClearRequest::default()
    } else {
        match serde_json::from_slice::<ClearRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::validation(format!("invalid clear request: {e}"))),
                )
                    .into_response();
            }
        }
    };
    ok_json(state.app.clear(SessionId(id), request.keys).await)
}

/// POST /sessions/:id/asset - Select an image (multipart field `file`)
#[utoipa::path(
    post,
    path = "/sessions/{id}/asset",
    tag = "image",
    params(("id" = i64, Path, description = "Session ID")),
    request_body(content = Vec<u8>, description = "Image upload (multipart/form-data, field `file`)", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image selected, process control enabled", body = crate::session::SessionView),
        (status = 400, description = "No file in the request or malformed upload", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 413, description = "Upload exceeds the configured size limit", body = ApiError),
        (status = 415, description = "Unsupported image type", body = ApiError)
    )
)]
pub async fn select_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    let mut asset: Option<UploadedAsset> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return invalid_upload(e),
        };
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let mime = field
            .content_type()
            .unwrap_or(DEFAULT_UPLOAD_MIME)
            .to_string();
        match field.bytes().await {
            Ok(bytes) => asset = Some(UploadedAsset::new(name, mime, bytes.to_vec())),
            Err(e) => return invalid_upload(e),
        }
    }

    let Some(asset) = asset else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "missing_file",
                "no image provided in 'file' field",
            )),
        )
            .into_response();
    };

    ok_json(state.app.select_asset(SessionId(id), asset).await)
}

/// 413 when the body limit was hit, 400 for any other malformed upload
fn invalid_upload(e: MultipartError) -> Response {
    tracing::warn!(error = %e.body_text(), "rejected upload");
    (
        e.status(),
        Json(ApiError::new(
            "invalid_file",
            format!("failed to read upload: {}", e.body_text()),
        )),
    )
        .into_response()
}

/// DELETE /sessions/:id/asset - Drop the pending image
#[utoipa::path(
    delete,
    path = "/sessions/{id}/asset",
    tag = "image",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Pending image dropped", body = crate::session::SessionView),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn clear_asset(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    ok_json(state.app.clear_asset(SessionId(id)).await)
}

/// POST /sessions/:id/process - Store the pending image
#[utoipa::path(
    post,
    path = "/sessions/{id}/process",
    tag = "image",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Image stored", body = crate::session::ProcessReport),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 409, description = "No image selected or process control disabled", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn process(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    ok_json(state.app.process(SessionId(id)).await)
}

fn link_response(result: crate::Result<Option<crate::export::RenderedLink>>, what: &str) -> Response {
    match result {
        Ok(Some(link)) => (StatusCode::OK, Json(DownloadLinkResponse::from(link))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(ApiError::not_found(what))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /sessions/:id/export - Download link for the output text
#[utoipa::path(
    get,
    path = "/sessions/{id}/export",
    tag = "export",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Download link", body = DownloadLinkResponse),
        (status = 404, description = "Session not found or output empty", body = ApiError),
        (status = 500, description = "Download icon missing", body = ApiError)
    )
)]
pub async fn export_output(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    link_response(state.app.export_output(SessionId(id)).await, "output text")
}

/// GET /sessions/:id/export/stored - Download link for the last stored image
#[utoipa::path(
    get,
    path = "/sessions/{id}/export/stored",
    tag = "export",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Download link", body = DownloadLinkResponse),
        (status = 404, description = "Session not found or nothing stored yet", body = ApiError),
        (status = 500, description = "Stored file or download icon missing", body = ApiError)
    )
)]
pub async fn export_stored(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    link_response(state.app.export_stored(SessionId(id)).await, "stored image")
}

/// POST /sessions/:id/voice - Voice translation (not available)
#[utoipa::path(
    post,
    path = "/sessions/{id}/voice",
    tag = "voice",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 404, description = "Session not found", body = ApiError),
        (status = 501, description = "Voice translation is not available", body = ApiError)
    )
)]
pub async fn translate_voice(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    ok_json(state.app.translate_voice(SessionId(id)).await)
}
