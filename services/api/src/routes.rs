use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use property_listings::auth::{auth_router, AuthService, CredentialVerifier};
use property_listings::listings::{
    admin_router, listing_router, ListingRepository, ListingService,
};

use crate::infra::AppState;

/// The rate-limited API surface: public browse, admin create, login/logout.
pub(crate) fn api_routes<R, V>(
    listings: Arc<ListingService<R>>,
    auth: Arc<AuthService<V>>,
) -> Router
where
    R: ListingRepository + 'static,
    V: CredentialVerifier + 'static,
{
    listing_router(listings.clone())
        .merge(admin_router(listings, auth.clone()))
        .merge(auth_router(auth))
}

/// Operational endpoints, mounted outside the rate limiter.
pub(crate) fn operational_routes() -> Router {
    Router::new()
        .route("/healthy", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
