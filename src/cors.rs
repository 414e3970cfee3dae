use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// The request origin when it starts with an allow-listed origin, otherwise
/// the first allow-listed origin.
pub fn resolve_origin<'a>(request_origin: &'a str, allowed: &'a [String]) -> &'a str {
    let is_allowed = !request_origin.is_empty()
        && allowed
            .iter()
            .any(|o| request_origin.starts_with(o.as_str()));
    if is_allowed {
        request_origin
    } else {
        allowed.first().map(String::as_str).unwrap_or("")
    }
}

pub async fn gate(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let request_origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let cors_origin = resolve_origin(&request_origin, &state.config.allowed_origins);

    if cors_origin != request_origin && !request_origin.is_empty() {
        tracing::debug!(origin = %request_origin, "origin not allow-listed");
    }
    let origin_value = HeaderValue::from_str(cors_origin).ok();

    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = res.headers_mut();
    if let Some(origin) = origin_value {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
    res
}
