//! Repository Traits
//!
//! Interface for durable account storage. Implementations are in the
//! infrastructure layer.

use thiserror::Error;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::value_object::email::Email;

/// Storage-layer failure taxonomy
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already bound to an account. Raised from the
    /// storage uniqueness constraint, never a pre-check: of concurrent
    /// creates for one email, exactly one insert wins and the rest
    /// surface this.
    #[error("Identifier already in use")]
    DuplicateIdentifier,

    /// Any other storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage-layer result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store trait
///
/// Owns account records and the email uniqueness invariant. No update
/// or delete operations: profile mutation happens outside this core.
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Insert a new account, assigning its id
    async fn create(&self, new_account: NewAccount) -> StoreResult<Account>;

    /// Look up an account by its unique email
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<Account>>;
}
