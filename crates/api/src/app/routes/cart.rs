use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value as JsonValue;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `POST /yandex/cart`: clamp each cart line to available stock.
pub async fn check_cart(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let req: dto::CartRequest = match dto::parse_body(body) {
        Ok(r) => r,
        Err(res) => return res,
    };

    let results = match services.stock.query_cart(&req.into_lines()).await {
        Ok(r) => r,
        Err(e) => return errors::query_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::CartResponse::from_results(results))).into_response()
}
