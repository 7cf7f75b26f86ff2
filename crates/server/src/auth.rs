use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metasearch_core::error::ApiError;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AuthQuery {
    auth: Option<String>,
}

/// Constant-time string compare.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.len() != b_bytes.len() {
        return false;
    }
    a_bytes.ct_eq(b_bytes).into()
}

/// Reject requests whose `auth` query parameter does not match the
/// configured addon password. A no-op when no password is configured.
pub async fn require_addon_password(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(password) = state.addon_password.as_deref() else {
        return next.run(request).await;
    };

    let provided = Query::<AuthQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(q)| q.auth);

    match provided {
        Some(auth) if constant_time_eq(&auth, password) => next.run(request).await,
        _ => {
            warn!(path = %request.uri().path(), "rejected request with bad auth parameter");
            AppError(ApiError::Unauthorized("invalid auth parameter".into())).into_response()
        }
    }
}
