//! Application Configuration
//!
//! Configuration for the Auth application layer. A usable signing
//! secret is a precondition for serving any request: resolution
//! failures are fatal startup errors, never per-request ones.

use std::env;
use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose;
use thiserror::Error;

/// Environment variable holding the base64-encoded signing secret
pub const TOKEN_SECRET_ENV: &str = "AUTH_TOKEN_SECRET";

/// Access token lifetime: 15 minutes from issuance
pub const TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Fatal configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Signing secret is not configured
    #[error("AUTH_TOKEN_SECRET is not set")]
    MissingSecret,

    /// Signing secret is present but unusable
    #[error("AUTH_TOKEN_SECRET must be base64 encoding exactly 32 bytes")]
    InvalidSecret,
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(token_secret: [u8; 32]) -> Self {
        Self {
            token_secret,
            token_ttl: TOKEN_TTL,
        }
    }

    /// Read the signing secret from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var(TOKEN_SECRET_ENV).map_err(|_| ConfigError::MissingSecret)?;
        let bytes = general_purpose::STANDARD
            .decode(raw.trim())
            .map_err(|_| ConfigError::InvalidSecret)?;
        let secret: [u8; 32] = bytes.try_into().map_err(|_| ConfigError::InvalidSecret)?;
        Ok(Self::new(secret))
    }

    /// Create config with a random secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl_is_fifteen_minutes() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(config.token_ttl, Duration::from_secs(900));
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_ne!(config1.token_secret, config2.token_secret);
        assert!(config1.token_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::with_random_secret();
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
    }
}
