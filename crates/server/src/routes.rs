use axum::extract::{Path, State};
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use metasearch_core::error::ApiError;
use metasearch_core::types::MediaKind;
use metasearch_metadata::gateway::Answer;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(addon_router(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any)),
        )
        .with_state(state)
}

/// Addon protocol routes, behind the password gate and the response cache.
fn addon_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/manifest.json", get(manifest))
        .route("/catalog/{kind}/{catalog_id}/{extra}", get(catalog))
        .route("/meta/{kind}/{id}", get(meta))
        .layer(middleware::from_fn_with_state(
            state.cache.clone(),
            crate::cache::cache_responses,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            crate::auth::require_addon_password,
        ))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Addon
// ---------------------------------------------------------------------------

async fn manifest() -> Json<serde_json::Value> {
    Json(crate::manifest::manifest())
}

fn parse_kind(kind: &str) -> Result<MediaKind, ApiError> {
    MediaKind::parse(kind).ok_or_else(|| ApiError::NotFound(format!("unknown type: {kind}")))
}

/// Degraded answers are marked `no-store` so neither clients nor the response
/// cache keep them.
fn respond<T: Serialize>(answer: Answer<T>) -> Response {
    let mut response = Json(answer.body).into_response();
    if answer.degraded {
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    response
}

async fn catalog(
    State(state): State<AppState>,
    Path((kind, catalog_id, extra)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    let media_kind = parse_kind(&kind)?;
    if media_kind.catalog_id() != catalog_id {
        return Err(ApiError::NotFound(format!("unknown catalog: {kind}/{catalog_id}")).into());
    }

    Ok(respond(state.gateway.search(media_kind, &extra).await?))
}

async fn meta(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let media_kind = parse_kind(&kind)?;
    Ok(respond(state.gateway.detail(media_kind, &id).await?))
}
