use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::errors;
use crate::context::CallerContext;

const MSG_MISSING: &str = "Authorization token not specified";
const MSG_DENIED: &str = "Access denied, invalid authorization token";

/// Loaded credentials for the two caller groups.
#[derive(Clone)]
pub struct AuthState {
    /// Marketplace partner tokens (any member is accepted).
    pub partner_tokens: Arc<HashSet<String>>,
    /// Upstream supplier token (exact match).
    pub create_token: Arc<str>,
}

impl AuthState {
    pub fn new(
        partner_tokens: impl IntoIterator<Item = String>,
        create_token: impl Into<String>,
    ) -> Self {
        let create_token: String = create_token.into();
        Self {
            partner_tokens: Arc::new(partner_tokens.into_iter().collect()),
            create_token: Arc::from(create_token),
        }
    }
}

/// Gate for marketplace partner endpoints.
pub async fn partner_auth(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let allowed = |token: &str| state.partner_tokens.contains(token);
    authorize(req, next, allowed).await
}

/// Gate for supplier endpoints (snapshot upload, event listing).
pub async fn supplier_auth(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let allowed = |token: &str| token == &*state.create_token;
    authorize(req, next, allowed).await
}

async fn authorize(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
    allowed: impl Fn(&str) -> bool,
) -> Response {
    let token = match extract_token(req.headers()) {
        Some(token) => token.to_string(),
        None => {
            tracing::warn!(path = %req.uri().path(), "request without authorization token");
            return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", MSG_MISSING);
        }
    };

    if !allowed(&token) {
        tracing::warn!(path = %req.uri().path(), "request with unknown authorization token");
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", MSG_DENIED);
    }

    req.extensions_mut().insert(CallerContext::new(token));
    next.run(req).await
}

/// The raw `Authorization` header value, trimmed. Partners send the bare
/// token, without a scheme prefix.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}
