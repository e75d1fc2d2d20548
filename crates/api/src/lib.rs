//! HTTP gateway: server wiring, auth gate, request/response mapping.

pub mod app;
pub mod context;
pub mod middleware;
