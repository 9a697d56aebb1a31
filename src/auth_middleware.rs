// src/auth_middleware.rs
//! Request authorization middleware
//!
//! Gates every inbound request: extracts a token from the `x-access-token`
//! header or the `token` cookie, decodes it into an identity claim, and
//! rejects tokenless requests to non-public paths. Derived context is
//! propagated to downstream handlers as request headers.

use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::auth::codec::TokenCodec;
use crate::auth::models::Claim;
use crate::common::{safe_token_log, AppState};

/// Explicit token header, preferred over the cookie
pub const TOKEN_HEADER: &str = "x-access-token";
/// Cookie fallback for browser clients
pub const TOKEN_COOKIE: &str = "token";
/// Propagated identity claim (JSON), absent for anonymous requests.
/// Spelled `x-authUser` on the wire; header names are case-insensitive.
pub const AUTH_USER_HEADER: &str = "x-authuser";
/// Propagated request origin
pub const ORIGIN_HEADER: &str = "x-origin";
/// Propagated full request URL
pub const URL_HEADER: &str = "x-url";

const FORBIDDEN_BODY: &str = "A token is required for authentication";

/// Paths reachable without a token. First match wins; every match has the
/// same effect, so this is a set membership test.
pub fn public_paths() -> Vec<Regex> {
    [
        r"^/favicon\.ico$",
        r"^/assets/",
        r"^/api/login$",
        r"^/api/register$",
        r"^/api/insights(/.*)?$",
        r"^/api/links(/.*)?$",
        r"^/api/sources/.+$",
        r"^/api/articles$",
        r"^/api/users/\d+$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("public path pattern must compile"))
    .collect()
}

/// Authorization middleware applied to the whole router
pub async fn authorize_request(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let state = state_lock.read().await.clone();

    let path = request.uri().path().to_string();
    let token = extract_token(request.headers());

    // decode failures never surface to the client; the request just loses
    // its identity
    let claim = match token.as_deref() {
        Some(raw) if raw != "undefined" => decode_claim(&state, raw),
        _ => None,
    };

    let is_public = state.public_paths.iter().any(|re| re.is_match(&path));

    if !is_public && token.is_none() {
        warn!(path = %path, "Rejected tokenless request to protected path");
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "statusText": FORBIDDEN_BODY })),
        )
            .into_response();
    }

    let (origin, url) = request_origin_and_url(&request, &state);
    let headers = request.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&origin) {
        headers.insert(ORIGIN_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&url) {
        headers.insert(URL_HEADER, value);
    }

    // strip any client-supplied identity header before propagating our own
    headers.remove(AUTH_USER_HEADER);
    if let Some(claim) = claim {
        match serde_json::to_string(&claim)
            .ok()
            .and_then(|json| HeaderValue::from_str(&json).ok())
        {
            Some(value) => {
                headers.insert(AUTH_USER_HEADER, value);
            }
            None => {
                warn!(
                    user_id = claim.user_id,
                    "Auth claim not representable as a header value"
                );
            }
        }
    }

    next.run(request).await
}

fn decode_claim(state: &AppState, raw: &str) -> Option<Claim> {
    let codec = match TokenCodec::new(state.token_key.clone()) {
        Ok(codec) => codec,
        Err(e) => {
            warn!(error = %e, "Token codec unavailable");
            return None;
        }
    };

    match codec.decode(raw) {
        Ok(claim) => Some(claim),
        Err(e) => {
            debug!(
                error = %e,
                token = %safe_token_log(raw),
                "Token decode failed, request treated as anonymous"
            );
            None
        }
    }
}

/// Token lookup: explicit header first, cookie second
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(TOKEN_HEADER).and_then(|h| h.to_str().ok()) {
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    cookie_value(headers, TOKEN_COOKIE)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Derive the request origin and full URL, rewriting the development
/// hostname to the public one in production
fn request_origin_and_url(request: &Request, state: &AppState) -> (String, String) {
    let host = request
        .headers()
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:3000");
    let scheme = request.uri().scheme_str().unwrap_or("http");

    let origin = if state.production && host == "localhost:3000" {
        format!("https://{}", state.public_host)
    } else {
        format!("{}://{}", scheme, host)
    };

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", origin, path_and_query);

    (origin, url)
}
