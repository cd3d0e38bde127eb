use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::credentials::CredentialVerifier;
use super::service::AuthService;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Router builder exposing the login/logout endpoints.
pub fn auth_router<V>(service: Arc<AuthService<V>>) -> Router
where
    V: CredentialVerifier + 'static,
{
    Router::new()
        .route("/auth/login", post(login_handler::<V>))
        .route("/auth/logout", get(logout_handler::<V>))
        .with_state(service)
}

/// 200 with an empty body and the session cookie attached, or a structured
/// 401 on a credential mismatch.
pub(crate) async fn login_handler<V>(
    State(service): State<Arc<AuthService<V>>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<CookieJar, AppError>
where
    V: CredentialVerifier + 'static,
{
    let cookie = service.login(&body.email, &body.password)?;
    Ok(jar.add(cookie))
}

pub(crate) async fn logout_handler<V>(
    State(service): State<Arc<AuthService<V>>>,
    jar: CookieJar,
) -> CookieJar
where
    V: CredentialVerifier + 'static,
{
    jar.add(service.logout())
}
