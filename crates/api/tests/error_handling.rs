//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use catalog_api::error::AppError;
use catalog_core::error::CoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("Template", "library:mysql"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Template with id library:mysql not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Missing parameter action".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Missing parameter action");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("icon is not valid base64".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "icon is not valid base64");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Refresh maps to 400 with REFRESH_FAILED code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_error_returns_400_with_scope() {
    let err = AppError::Core(CoreError::Refresh {
        scope: "envA".into(),
        message: "sync engine unreachable".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "REFRESH_FAILED");
    assert_eq!(
        json["error"],
        "Refresh of scope 'envA' failed: sync engine unreachable"
    );
}

// ---------------------------------------------------------------------------
// Test: storage failures map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::storage(
        "connection to 10.0.0.5 refused".to_string(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("10.0.0.5"));
}

// ---------------------------------------------------------------------------
// Test: sqlx RowNotFound inside a storage error maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_row_not_found_returns_404() {
    let err = AppError::Core(CoreError::storage(sqlx::Error::RowNotFound));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Internal maps to 500 and sanitizes like InternalError
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::Internal("panic stack trace here".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("panic stack trace"),
        "Core internal error must not leak details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}
