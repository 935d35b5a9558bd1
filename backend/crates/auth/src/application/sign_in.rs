//! Sign In Use Case
//!
//! Authenticates an email/password pair and returns an access token.
//!
//! Every failure on this path collapses to `InvalidCredentials`: an
//! unknown email must be indistinguishable from a wrong password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::issue_token::{SessionToken, TokenIssuer};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    issuer: Arc<TokenIssuer>,
}

impl<S> SignInUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, issuer: Arc<TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SessionToken> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Accounts provisioned without a password cannot log in here
        let Some(password_hash) = account.password_hash.as_ref() else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(&account.account_id, &account.email)?;

        tracing::info!(
            account_id = %account.account_id,
            "Account signed in"
        );

        Ok(token)
    }
}
