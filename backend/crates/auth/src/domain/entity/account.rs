//! Account Entity
//!
//! Durable account record owned by the credential store.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{account_id::AccountId, email::Email};

/// Account entity
///
/// `account_id` is assigned by the credential store at creation time
/// and never changes. The password hash stays inside the store/service
/// boundary: operations return tokens, not accounts, so it can never
/// leak into a response payload.
#[derive(Debug, Clone)]
pub struct Account {
    /// Opaque unique identifier, assigned at creation
    pub account_id: AccountId,
    /// Unique, case-sensitive login identifier
    pub email: Email,
    /// Argon2id hash in PHC form. Absent for accounts provisioned
    /// through a path that never set a password; such accounts cannot
    /// log in here.
    pub password_hash: Option<HashedPassword>,
    /// Optional display attributes, no uniqueness constraint
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new account record
///
/// The store assigns the id; a password hash is always required on
/// this path.
#[derive(Debug)]
pub struct NewAccount {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
