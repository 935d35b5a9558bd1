//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::TokenIssuer;
use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialStore;
use crate::infra::postgres::PgCredentialStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the auth router with the PostgreSQL credential store
pub fn auth_router(store: PgCredentialStore, config: AuthConfig) -> Router {
    auth_router_generic(store, config)
}

/// Create an auth router for any credential store implementation
pub fn auth_router_generic<S>(store: S, config: AuthConfig) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
{
    let state = AuthAppState {
        store: Arc::new(store),
        issuer: Arc::new(TokenIssuer::new(&config)),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<S>))
        .route("/login", post(handlers::sign_in::<S>))
        .with_state(state)
}
