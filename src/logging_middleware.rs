// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %pretty_json(body_str),
                "Request"
            );
        }
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            debug!(
                status = %parts.status,
                response_body = %pretty_json(body_str),
                "Response"
            );
        }
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Pretty-print JSON bodies, pass anything else through untouched
fn pretty_json(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}
