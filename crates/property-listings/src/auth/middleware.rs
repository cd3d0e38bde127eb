use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::credentials::CredentialVerifier;
use super::service::AuthService;
use crate::error::AppError;

/// Rejects the request with a structured 401 unless a valid admin session
/// cookie is attached. Attach with `middleware::from_fn` and a cloned
/// service handle:
///
/// ```ignore
/// router.route_layer(middleware::from_fn(move |request, next| {
///     require_admin(auth.clone(), request, next)
/// }))
/// ```
pub async fn require_admin<V>(
    auth: Arc<AuthService<V>>,
    request: Request,
    next: Next,
) -> Response
where
    V: CredentialVerifier + 'static,
{
    match auth.authenticate(request.headers()) {
        Ok(_claims) => next.run(request).await,
        Err(err) => AppError::from(err).into_response(),
    }
}
