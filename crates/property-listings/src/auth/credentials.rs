use crate::config::AuthConfig;

/// Decides whether a login attempt belongs to the administrator. Kept behind
/// a trait so the mechanism can be swapped without touching request handling.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// The single configured admin credential pair.
#[derive(Debug, Clone)]
pub struct StaticAdminCredentials {
    email: String,
    password: String,
}

impl StaticAdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.admin_email.clone(), config.admin_password.clone())
    }
}

impl CredentialVerifier for StaticAdminCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
