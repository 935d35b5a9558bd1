//! Signed Access Tokens
//!
//! Stateless HMAC-SHA256 tokens: a JSON claim set, base64url-encoded
//! and joined with its signature as `payload.signature`. Verification
//! recomputes the signature and checks expiry; no storage is involved,
//! so a token's validity is entirely reconstructable from its contents
//! and the process secret.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Claims
// ============================================================================

/// Claim set embedded in an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account identifier
    pub sub: String,
    /// Account email, embedded for downstream convenience
    pub email: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

impl Claims {
    /// Build a claim set expiring `ttl` after `issued_at`
    pub fn new(
        sub: impl Into<String>,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: sub.into(),
            email: email.into(),
            iat,
            exp: iat + ttl.as_secs() as i64,
        }
    }

    /// Expiry instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Token verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not in `payload.signature` form, or undecodable
    #[error("Token is malformed")]
    Malformed,

    /// Signature does not match the payload
    #[error("Token signature mismatch")]
    InvalidSignature,

    /// Expiry has passed
    #[error("Token has expired")]
    Expired,

    /// Claim serialization failed
    #[error("Claim serialization failed: {0}")]
    Serialization(String),
}

// ============================================================================
// Token Signer
// ============================================================================

/// Signs and verifies access tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
}

impl TokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Sign a claim set into `payload.signature` form
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| TokenError::Serialization(e.to_string()))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            payload_b64,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify signature and expiry against the supplied clock reading
    ///
    /// A token is accepted through its `exp` instant inclusive and
    /// rejected strictly after. The signature is checked before the
    /// payload is parsed, in constant time.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Verify against the current clock
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(15 * 60);

    fn signer() -> TokenSigner {
        TokenSigner::new([7u8; 32])
    }

    fn issued_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let signer = signer();
        let claims = Claims::new("account-1", "user@example.com", issued_at(), TTL);

        let token = signer.sign(&claims).unwrap();
        let decoded = signer.verify_at(&token, issued_at()).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expiry_is_issued_at_plus_ttl() {
        let claims = Claims::new("account-1", "user@example.com", issued_at(), TTL);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(
            claims.expires_at(),
            issued_at() + chrono::Duration::minutes(15)
        );
    }

    #[test]
    fn test_token_valid_through_expiry_instant() {
        let signer = signer();
        let claims = Claims::new("account-1", "user@example.com", issued_at(), TTL);
        let token = signer.sign(&claims).unwrap();

        let at_expiry = issued_at() + chrono::Duration::minutes(15);
        assert!(signer.verify_at(&token, at_expiry).is_ok());
    }

    #[test]
    fn test_token_expired_one_second_after() {
        let signer = signer();
        let claims = Claims::new("account-1", "user@example.com", issued_at(), TTL);
        let token = signer.sign(&claims).unwrap();

        let past_expiry = issued_at() + chrono::Duration::minutes(15) + chrono::Duration::seconds(1);
        assert!(matches!(
            signer.verify_at(&token, past_expiry),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let claims = Claims::new("account-1", "user@example.com", issued_at(), TTL);
        let token = signer.sign(&claims).unwrap();

        let (payload_b64, signature_b64) = token.split_once('.').unwrap();
        let mut payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        let json = String::from_utf8(payload.clone()).unwrap();
        payload = json.replace("account-1", "account-2").into_bytes();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(&payload), signature_b64);

        assert!(matches!(
            signer.verify_at(&forged, issued_at()),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = signer();
        let other = TokenSigner::new([8u8; 32]);

        let claims = Claims::new("account-1", "user@example.com", issued_at(), TTL);
        let token = signer.sign(&claims).unwrap();

        assert!(matches!(
            other.verify_at(&token, issued_at()),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let signer = signer();

        assert!(matches!(
            signer.verify_at("no-dot-here", issued_at()),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            signer.verify_at("bad!base64.bad!base64", issued_at()),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            signer.verify_at("", issued_at()),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug = format!("{:?}", signer());
        assert!(debug.contains("REDACTED"));
    }
}
