use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::{Listing, ListingDraft};
use super::query::{ListingFilter, ListingPage};
use super::repository::ListingRepository;
use super::service::ListingService;
use crate::auth::credentials::CredentialVerifier;
use crate::auth::middleware::require_admin;
use crate::auth::service::AuthService;
use crate::error::AppError;

/// Router builder for the public browse endpoints.
pub fn listing_router<R>(service: Arc<ListingService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/listing", get(search_handler::<R>))
        .route("/listing/:id", get(fetch_handler::<R>))
        .with_state(service)
}

/// Router builder for the admin-only create endpoint, guarded by the session
/// cookie check.
pub fn admin_router<R, V>(
    service: Arc<ListingService<R>>,
    auth: Arc<AuthService<V>>,
) -> Router
where
    R: ListingRepository + 'static,
    V: CredentialVerifier + 'static,
{
    Router::new()
        .route("/admin/listings", post(create_handler::<R>))
        .route_layer(middleware::from_fn(move |request, next| {
            require_admin(auth.clone(), request, next)
        }))
        .with_state(service)
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<ListingPage>, AppError>
where
    R: ListingRepository + 'static,
{
    Ok(Json(service.find_all(filter)?))
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(id): Path<u64>,
) -> Result<Json<Listing>, AppError>
where
    R: ListingRepository + 'static,
{
    service
        .find_by_id(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Listing with ID = {id} not found")))
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Json(draft): Json<ListingDraft>,
) -> Result<(StatusCode, Json<Listing>), AppError>
where
    R: ListingRepository + 'static,
{
    let listing = service.create(draft)?;
    Ok((StatusCode::CREATED, Json(listing)))
}
