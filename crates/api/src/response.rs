//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope. Listings return
//! [`TemplateCollection`](catalog_core::resource::TemplateCollection), which
//! carries the same `data` key plus collection `actions`.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use catalog_core::representation::Icon;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: resource }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Serve a decoded icon as binary content.
pub fn icon_response(icon: Icon) -> AppResult<Response> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, icon.content_type)
        .header(header::CONTENT_LENGTH, icon.bytes.len().to_string())
        .header(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        );
    if let Ok(disposition) = HeaderValue::from_str(&content_disposition(&icon.filename)) {
        builder = builder.header(header::CONTENT_DISPOSITION, disposition);
    }
    builder
        .body(Body::from(icon.bytes))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// `inline` disposition with `filename` as an escaped quoted-string.
fn content_disposition(filename: &str) -> String {
    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    format!("inline; filename=\"{escaped}\"")
}

/// Serve raw readme text.
pub fn readme_response(readme: &str) -> AppResult<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(readme.to_string()))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
