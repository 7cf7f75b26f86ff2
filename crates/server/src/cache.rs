use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const CACHE_STATUS: &str = "cache-status";

/// In-memory TTL cache of successful GET responses, keyed by request URI.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<Mutex<HashMap<String, CachedResponse>>>,
    ttl: Duration,
}

#[derive(Clone)]
struct CachedResponse {
    stored_at: Instant,
    content_type: Option<HeaderValue>,
    body: Bytes,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    async fn get(&self, key: &str) -> Option<CachedResponse> {
        let mut entries = self.inner.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn insert(&self, key: String, content_type: Option<HeaderValue>, body: Bytes) {
        let mut entries = self.inner.lock().await;
        let ttl = self.ttl;
        entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            CachedResponse {
                stored_at: Instant::now(),
                content_type,
                body,
            },
        );
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

fn is_no_store(response: &Response) -> bool {
    response
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|d| d.trim().eq_ignore_ascii_case("no-store")))
}

impl CachedResponse {
    fn into_hit_response(self) -> Response {
        let mut response = (StatusCode::OK, self.body).into_response();
        let headers = response.headers_mut();
        if let Some(content_type) = self.content_type {
            headers.insert(CONTENT_TYPE, content_type);
        }
        headers.insert(CACHE_STATUS, HeaderValue::from_static("hit"));
        response
    }
}

/// Serve repeated GETs from the cache; store `200` responses not marked
/// `no-store`.
pub async fn cache_responses(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET || cache.ttl.is_zero() {
        return next.run(request).await;
    }

    let key = request.uri().to_string();
    if let Some(hit) = cache.get(&key).await {
        debug!(uri = %key, "response cache hit");
        return hit.into_hit_response();
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK || is_no_store(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(uri = %key, error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    cache
        .insert(key, parts.headers.get(CONTENT_TYPE).cloned(), bytes.clone())
        .await;
    parts
        .headers
        .insert(CACHE_STATUS, HeaderValue::from_static("miss"));
    Response::from_parts(parts, Body::from(bytes))
}
