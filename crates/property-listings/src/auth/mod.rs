//! Cookie-based admin session flow: credential verification, session token
//! signing, the login/logout routes, and the guard middleware for admin-only
//! routes.

pub mod credentials;
pub mod middleware;
pub mod router;
pub mod service;
pub mod session;

pub use credentials::{CredentialVerifier, StaticAdminCredentials};
pub use middleware::require_admin;
pub use router::auth_router;
pub use service::{AuthService, SESSION_COOKIE};
pub use session::{SessionClaims, SessionSigner};

/// Error raised across the auth flow. Every variant renders as a structured
/// 401 at the boundary; the signing failure is wrapped rather than exposed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Missing authentication cookie")]
    MissingSession,
    #[error("Invalid or expired session")]
    InvalidSession,
    #[error("Unable to issue session token")]
    TokenCreation(#[source] jsonwebtoken::errors::Error),
}
