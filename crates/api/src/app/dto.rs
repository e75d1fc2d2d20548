//! Request/response DTOs in the partner's wire shape (camelCase, nested
//! `skus`/`cart` envelopes) and mapping to/from the domain types.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockgate_core::time::format_seconds;
use stockgate_inventory::{CartLine, CartLineResult, StockQueryResult};

use crate::app::errors;

/// Unwrap an extracted JSON body, answering rejections in the error shape.
pub fn json_body(
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<JsonValue, axum::response::Response> {
    body.map(|Json(value)| value)
        .map_err(errors::json_rejection_to_response)
}

/// Deserialize a JSON body, turning shape errors into a 400.
pub fn parse_body<T>(body: JsonValue) -> Result<T, axum::response::Response>
where
    T: DeserializeOwned,
{
    serde_json::from_value(body)
        .map_err(|e| errors::invalid_body(format!("invalid request body: {e}")))
}

// -------------------------
// Stocks
// -------------------------

/// Warehouse identifier as sent by the partner (numeric or textual); echoed
/// back in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WarehouseId {
    Number(u64),
    Text(String),
}

impl core::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WarehouseId::Number(n) => write!(f, "{n}"),
            WarehouseId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StocksRequest {
    pub skus: Vec<String>,
    pub warehouse_id: WarehouseId,
}

#[derive(Debug, Serialize)]
pub struct StocksResponse {
    pub skus: Vec<SkuStock>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuStock {
    pub sku: String,
    pub warehouse_id: WarehouseId,
    pub items: Vec<StockItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: u64,
    pub updated_at: String,
}

impl StocksResponse {
    pub fn from_results(warehouse_id: &WarehouseId, results: Vec<StockQueryResult>) -> Self {
        let skus = results
            .into_iter()
            .map(|r| SkuStock {
                sku: r.sku,
                warehouse_id: warehouse_id.clone(),
                items: vec![StockItem {
                    kind: r.kind.as_str(),
                    count: r.count,
                    updated_at: format_seconds(&r.available_at),
                }],
            })
            .collect();
        Self { skus }
    }
}

// -------------------------
// Cart
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub cart: CartRequestBody,
}

#[derive(Debug, Deserialize)]
pub struct CartRequestBody {
    pub items: Vec<CartRequestItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequestItem {
    pub feed_id: JsonValue,
    pub offer_id: String,
    pub count: u64,
}

impl CartRequest {
    pub fn into_lines(self) -> Vec<CartLine> {
        self.cart
            .items
            .into_iter()
            .map(|item| CartLine {
                feed_id: item.feed_id,
                offer_id: item.offer_id,
                requested: item.count,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartResponseBody,
}

#[derive(Debug, Serialize)]
pub struct CartResponseBody {
    pub items: Vec<CartResponseItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponseItem {
    pub feed_id: JsonValue,
    pub offer_id: String,
    pub count: u64,
    pub delivery: bool,
}

impl CartResponse {
    pub fn from_results(results: Vec<CartLineResult>) -> Self {
        let items = results
            .into_iter()
            .map(|r| CartResponseItem {
                feed_id: r.feed_id,
                offer_id: r.offer_id,
                count: r.count,
                delivery: r.delivery,
            })
            .collect();
        Self {
            cart: CartResponseBody { items },
        }
    }
}
