//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, TokenIssuer};
use crate::domain::repository::CredentialStore;
use crate::error::AuthResult;
use crate::presentation::dto::{SignInRequest, SignUpRequest, TokenResponse};

/// Shared state for auth handlers
pub struct AuthAppState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub issuer: Arc<TokenIssuer>,
}

impl<S> Clone for AuthAppState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<(StatusCode, Json<TokenResponse>)>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.store.clone(), state.issuer.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let token = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token: token.access_token,
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /auth/login
pub async fn sign_in<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.store.clone(), state.issuer.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let token = use_case.execute(input).await?;

    Ok(Json(TokenResponse {
        access_token: token.access_token,
    }))
}
