//! Article fetch proxy handlers

use axum::{extract::Extension, response::IntoResponse, Json};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::models::{FetchArticleRequest, FetchArticleResponse};
use crate::common::{ApiError, AppState, Validator};

const FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Why the whole strategy ladder failed. Only the outcome of the final
/// attempt is reported to the client.
#[derive(Debug)]
pub enum FetchFailure {
    Status(u16),
    Timeout,
    Transport(String),
}

/// Header profiles tried in order: a full browser identity, a minimal one,
/// then bare requests. Some sites reject one but accept another.
fn header_profiles() -> [Vec<(&'static str, &'static str)>; 3] {
    let full_browser = vec![
        (
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        ),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Cache-Control", "no-cache"),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
    ];

    let minimal = vec![
        ("User-Agent", "Mozilla/5.0 (compatible; InspectBot/1.0)"),
        ("Accept", "text/html"),
    ];

    [full_browser, minimal, Vec::new()]
}

/// Try each header profile in order with a per-attempt timeout, stopping at
/// the first HTTP-OK response. Returns the body and the number of upstream
/// calls made.
pub async fn fetch_with_profiles(
    client: &Client,
    url: &str,
) -> Result<(String, usize), FetchFailure> {
    let mut last_failure = FetchFailure::Transport("no fetch attempted".to_string());

    for (index, profile) in header_profiles().iter().enumerate() {
        let attempts = index + 1;

        let mut request = client.get(url).timeout(FETCH_TIMEOUT);
        for (name, value) in profile {
            request = request.header(*name, *value);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    match response.text().await {
                        Ok(body) => return Ok((body, attempts)),
                        Err(e) => {
                            debug!(url = %url, attempt = attempts, error = %e, "Upstream body read failed");
                            last_failure = FetchFailure::Transport(e.to_string());
                        }
                    }
                } else {
                    debug!(url = %url, attempt = attempts, status = %status, "Upstream rejected fetch");
                    last_failure = FetchFailure::Status(status.as_u16());
                }
            }
            Err(e) if e.is_timeout() => {
                debug!(url = %url, attempt = attempts, "Upstream fetch timed out");
                last_failure = FetchFailure::Timeout;
            }
            Err(e) => {
                debug!(url = %url, attempt = attempts, error = %e, "Upstream fetch failed");
                last_failure = FetchFailure::Transport(e.to_string());
            }
        }
    }

    Err(last_failure)
}

/// POST /api/articles - Retrieve raw HTML for a user-supplied URL
pub async fn fetch_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<FetchArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::BadRequest(
            "A valid article URL is required".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();
    let url = request.url.trim().to_string();

    match fetch_with_profiles(&state.http, &url).await {
        Ok((html, attempts)) => {
            if html.trim().is_empty() {
                return Err(ApiError::NotFound("No content found at URL".to_string()));
            }
            info!(url = %url, attempts = attempts, "Article fetched");
            Ok(Json(FetchArticleResponse { html, url, attempts }))
        }
        Err(FetchFailure::Timeout) => Err(ApiError::RequestTimeout(
            "Timed out fetching the article".to_string(),
        )),
        Err(FetchFailure::Status(status)) => Err(ApiError::Upstream {
            status,
            message: format!("Upstream responded with status {}", status),
        }),
        Err(FetchFailure::Transport(e)) => {
            error!(url = %url, error = %e, "Article fetch failed");
            Err(ApiError::InternalServer(
                "Failed to fetch article".to_string(),
            ))
        }
    }
}
