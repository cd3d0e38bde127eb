use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin email.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies the HS256 tokens carried by the session cookie.
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl SessionSigner {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// How long issued tokens (and therefore the cookie) stay valid.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn sign(&self, email: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.ttl_secs as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::TokenCreation)
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidSession)
    }
}
