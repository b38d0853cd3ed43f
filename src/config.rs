//! Startup configuration
//!
//! Configuration is validated once at process startup and injected into the
//! collaborators that need it, never read from the environment at call time.

use crate::error::CoreError;

/// Environment variable holding the identity collaborator's shared secret.
pub const AUTH_SECRET_VAR: &str = "FITTRACK_AUTH_SECRET";

/// Validated process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret handed to the identity collaborator for credential
    /// verification. The core never inspects it.
    pub auth_secret: String,
}

impl AppConfig {
    /// Build a config from an explicit secret, rejecting blank values.
    pub fn new(auth_secret: impl Into<String>) -> Result<Self, CoreError> {
        let auth_secret = auth_secret.into();
        if auth_secret.trim().is_empty() {
            return Err(CoreError::Config(format!(
                "{AUTH_SECRET_VAR} must not be empty"
            )));
        }
        Ok(Self { auth_secret })
    }

    /// Read and validate configuration from the environment. Call once at
    /// startup.
    pub fn from_env() -> Result<Self, CoreError> {
        let secret = std::env::var(AUTH_SECRET_VAR)
            .map_err(|_| CoreError::Config(format!("missing {AUTH_SECRET_VAR} in environment")))?;
        Self::new(secret)
    }
}
