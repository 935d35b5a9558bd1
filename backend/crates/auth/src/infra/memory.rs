//! In-Memory Credential Store
//!
//! Backs the use-case tests and local development. The mutex plays the
//! role of the database transaction: membership check and insert happen
//! under one lock acquisition, so concurrent creates for the same email
//! resolve to exactly one winner and the rest observe
//! `DuplicateIdentifier`.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::{CredentialStore, StoreError, StoreResult};
use crate::domain::value_object::{account_id::AccountId, email::Email};

/// Credential store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.lock().expect("credential store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an account that has no password hash, as an externally
    /// provisioned account would. Test seam for the defensive login
    /// path; such accounts can never authenticate with a password.
    pub fn insert_passwordless(&self, email: Email) -> Account {
        let now = Utc::now();
        let account = Account {
            account_id: AccountId::new(),
            email,
            password_hash: None,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };

        self.accounts
            .lock()
            .expect("credential store lock poisoned")
            .insert(account.email.as_str().to_string(), account.clone());

        account
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, new_account: NewAccount) -> StoreResult<Account> {
        let mut accounts = self.accounts.lock().expect("credential store lock poisoned");

        if accounts.contains_key(new_account.email.as_str()) {
            return Err(StoreError::DuplicateIdentifier);
        }

        let now = Utc::now();
        let account = Account {
            account_id: AccountId::new(),
            email: new_account.email,
            password_hash: Some(new_account.password_hash),
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            created_at: now,
            updated_at: now,
        };

        accounts.insert(account.email.as_str().to_string(), account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.lock().expect("credential store lock poisoned");
        Ok(accounts.get(email.as_str()).cloned())
    }
}
