use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockgate_infra::{QueryError, StoreError};

/// Map a query failure. A missing or unreadable snapshot is a 503.
pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    match err {
        QueryError::ServiceUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
        }
        QueryError::Storage(msg) => {
            tracing::error!("stock query failed: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    let kind = err.kind();
    match err {
        StoreError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, kind, msg),
        StoreError::NotFound(msg) | StoreError::Corrupt(msg) => {
            tracing::error!(kind, "stored data unavailable: {msg}");
            json_error(StatusCode::SERVICE_UNAVAILABLE, kind, msg)
        }
        StoreError::Storage(msg) => {
            tracing::error!(kind, "storage operation failed: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, kind, msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 400 for a request body that lacks required fields.
pub fn invalid_body(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_input", message)
}

/// Body that axum could not read as JSON, keeping axum's status code.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    let status = rejection.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "payload_too_large"
    } else {
        "invalid_input"
    };
    json_error(status, code, rejection.body_text())
}
