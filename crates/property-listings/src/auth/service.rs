use std::sync::Arc;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::warn;

use super::credentials::CredentialVerifier;
use super::session::{SessionClaims, SessionSigner};
use super::AuthError;

/// Name of the HTTP-only cookie carrying the session token.
pub const SESSION_COOKIE: &str = "Authentication";

/// Login/logout/session-check operations shared by the auth routes and the
/// admin guard middleware.
pub struct AuthService<V> {
    verifier: Arc<V>,
    signer: SessionSigner,
}

impl<V> AuthService<V>
where
    V: CredentialVerifier + 'static,
{
    pub fn new(verifier: Arc<V>, signer: SessionSigner) -> Self {
        Self { verifier, signer }
    }

    /// Issues the session cookie when the credential pair is correct.
    pub fn login(&self, email: &str, password: &str) -> Result<Cookie<'static>, AuthError> {
        if !self.verifier.verify(email, password) {
            warn!("rejected admin login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.sign(email)?;
        let ttl = i64::try_from(self.signer.ttl_secs()).unwrap_or(i64::MAX);
        Ok(Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .path("/")
            .max_age(time::Duration::seconds(ttl))
            .build())
    }

    /// The cleared cookie handed back on logout: same name and path, empty
    /// value, immediate expiry.
    pub fn logout(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .path("/")
            .max_age(time::Duration::ZERO)
            .build()
    }

    /// Extracts and verifies the session cookie from request headers.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<SessionClaims, AuthError> {
        let jar = CookieJar::from_headers(headers);
        let cookie = jar.get(SESSION_COOKIE).ok_or(AuthError::MissingSession)?;
        self.signer.verify(cookie.value())
    }
}
