//! Password Hashing and Verification
//!
//! Argon2id-based password handling with:
//! - Memory-hard hashing (recommended by OWASP)
//! - Internally generated random salt, embedded in the PHC output
//! - Zeroization of clear text material
//! - Constant-time comparison
//!
//! No strength policy lives here. What counts as an acceptable password
//! is the caller's concern, and verification must keep working for
//! whatever was accepted at signup time.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum password length in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password shape violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty or contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password
    ///
    /// Unicode is normalized using NFKC before use so that the same
    /// password verifies regardless of input form. The only rejections
    /// are empty/whitespace-only input and an upper length bound; there
    /// is deliberately no minimum length or composition rule.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points, not bytes
        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(normalized))
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// The random salt is generated here and embedded in the PHC
    /// output, so verification needs nothing beyond the stored string.
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        // Random 128-bit salt
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Stores the Argon2id hash in PHC format, which includes the algorithm
/// identifier, version, parameters, salt, and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Uses constant-time comparison to prevent timing attacks.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let argon2 = Argon2::default();

        // Argon2 uses constant-time comparison internally
        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Check if the hash needs to be rehashed (e.g., parameters changed)
    pub fn needs_rehash(&self) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return true,
        };

        parsed_hash.algorithm != argon2::Algorithm::Argon2id.ident()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("correct horse battery staple".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        assert!(hashed.verify(&password));

        let wrong = ClearTextPassword::new("incorrect horse".to_string()).unwrap();
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_short_password_is_allowed() {
        // No strength policy: short passwords hash and verify normally
        let password = ClearTextPassword::new("pw1".to_string()).unwrap();
        let hashed = password.hash().unwrap();
        assert!(hashed.verify(&password));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert_eq!(
            ClearTextPassword::new("".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("   ".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
    }

    #[test]
    fn test_too_long_password_rejected() {
        let long_pass = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(matches!(
            ClearTextPassword::new(long_pass).unwrap_err(),
            PasswordPolicyError::TooLong { .. }
        ));

        // At the bound is fine
        let max_pass = "a".repeat(MAX_PASSWORD_LENGTH);
        assert!(ClearTextPassword::new(max_pass).is_ok());
    }

    #[test]
    fn test_salt_is_random() {
        let password = ClearTextPassword::new("same password".to_string()).unwrap();
        let first = password.hash().unwrap();
        let second = password.hash().unwrap();

        // Same password, different salt, different PHC string
        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert!(first.verify(&password));
        assert!(second.verify(&password));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("roundtrip me".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        let phc = hashed.as_phc_string().to_string();
        let restored = HashedPassword::from_phc_string(phc).unwrap();

        assert!(restored.verify(&password));
    }

    #[test]
    fn test_invalid_phc_string_rejected() {
        assert!(HashedPassword::from_phc_string("not a phc string").is_err());
        assert!(HashedPassword::from_phc_string("").is_err());
    }

    #[test]
    fn test_unicode_password() {
        let password = ClearTextPassword::new("пароль-暗証番号".to_string()).unwrap();
        let hashed = password.hash().unwrap();
        assert!(hashed.verify(&password));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("SecretValue".to_string()).unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = password.hash().unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
    }

    #[test]
    fn test_argon2id_does_not_need_rehash() {
        let password = ClearTextPassword::new("some password".to_string()).unwrap();
        let hashed = password.hash().unwrap();
        assert!(!hashed.needs_rehash());
    }
}
