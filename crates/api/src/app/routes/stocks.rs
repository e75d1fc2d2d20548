use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::Value as JsonValue;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `POST /yandex/stocks/create`: replace the whole snapshot.
pub async fn create_stocks(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let snapshot = match services.snapshots().replace_json(body).await {
        Ok(s) => s,
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(records = snapshot.len(), "stock snapshot replaced");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Data loaded successfully",
            "records": snapshot.len(),
        })),
    )
        .into_response()
}

/// `POST /yandex/stocks`: counts for the requested SKUs (unknown SKUs omitted).
pub async fn query_stocks(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let req: dto::StocksRequest = match dto::parse_body(body) {
        Ok(r) => r,
        Err(res) => return res,
    };

    let warehouse = req.warehouse_id.to_string();
    let results = match services
        .stock
        .query_by_sku(&req.skus, &warehouse, Utc::now())
        .await
    {
        Ok(r) => r,
        Err(e) => return errors::query_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(dto::StocksResponse::from_results(&req.warehouse_id, results)),
    )
        .into_response()
}
