//! Token Issuance
//!
//! Builds and signs the stateless access token returned by signup and
//! login. A pure function of (claims, secret, clock): once the secret
//! resolved at startup, the only failure left on this path is claim
//! serialization, surfaced as an internal error.

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::token::{Claims, TokenSigner};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::AuthResult;

/// Signed token, the full return shape of signup and login
///
/// The account record (and its password hash) never travels with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub access_token: String,
}

/// Issues signed access tokens for authenticated accounts
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    signer: TokenSigner,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            signer: TokenSigner::new(config.token_secret),
            ttl: config.token_ttl,
        }
    }

    /// Issue a token for the given account at the current time
    pub fn issue(&self, account_id: &AccountId, email: &Email) -> AuthResult<SessionToken> {
        self.issue_at(account_id, email, Utc::now())
    }

    /// Issue with an explicit issuance time
    pub fn issue_at(
        &self,
        account_id: &AccountId,
        email: &Email,
        issued_at: DateTime<Utc>,
    ) -> AuthResult<SessionToken> {
        let claims = Claims::new(account_id.to_string(), email.as_str(), issued_at, self.ttl);
        let access_token = self.signer.sign(&claims)?;
        Ok(SessionToken { access_token })
    }

    /// The verification half, for middleware and tests
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}
