//! Sign Up Use Case
//!
//! Creates a new account and returns its first access token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::issue_token::{SessionToken, TokenIssuer};
use crate::domain::entity::account::NewAccount;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    issuer: Arc<TokenIssuer>,
}

impl<S> SignUpUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, issuer: Arc<TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SessionToken> {
        let email = Email::new(input.email)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Salt is generated inside the hash and embedded in its output
        let password_hash = password.hash()?;

        // Uniqueness is the storage constraint's call. A lost race
        // surfaces as DuplicateIdentifier -> CredentialsTaken and fails
        // the whole operation: no fallback, no retry, no token.
        let account = self
            .store
            .create(NewAccount {
                email,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await?;

        let token = self.issuer.issue(&account.account_id, &account.email)?;

        tracing::info!(
            account_id = %account.account_id,
            "Account created"
        );

        Ok(token)
    }
}
