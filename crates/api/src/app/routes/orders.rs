use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value as JsonValue;

use stockgate_orders::OrderEventKind;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

/// `POST /yandex/order/accept`
pub async fn accept_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    record(&services, &caller, OrderEventKind::Accepted, body).await
}

/// `POST /yandex/order/status`
pub async fn order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    record(&services, &caller, OrderEventKind::StatusChanged, body).await
}

async fn record(
    services: &AppServices,
    caller: &CallerContext,
    kind: OrderEventKind,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    // Stored opaquely; only presence of a body object is required.
    if !body.is_object() {
        return errors::invalid_body("order payload must be a JSON object");
    }

    let id = match services.orders.append(caller.token(), kind, body).await {
        Ok(id) => id,
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(event_id = %id, %kind, "order event recorded");

    (
        StatusCode::OK,
        Json(serde_json::json!({ "id": id.to_string() })),
    )
        .into_response()
}

/// `GET /yandex/orders`: every stored event, unordered.
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.orders.list_all().await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
