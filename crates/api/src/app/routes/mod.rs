use axum::{routing::{get, post}, Router};

pub mod cart;
pub mod orders;
pub mod stocks;
pub mod system;

/// Endpoints called by the marketplace partner.
pub fn partner_router() -> Router {
    Router::new()
        .route("/yandex/stocks", post(stocks::query_stocks))
        .route("/yandex/cart", post(cart::check_cart))
        .route("/yandex/order/accept", post(orders::accept_order))
        .route("/yandex/order/status", post(orders::order_status))
}

/// Endpoints called by the upstream supplier / operator.
pub fn supplier_router() -> Router {
    Router::new()
        .route("/yandex/stocks/create", post(stocks::create_stocks))
        .route("/yandex/orders", get(orders::list_orders))
}
