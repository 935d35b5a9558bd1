//! Auth Middleware
//!
//! Middleware for requiring a valid access token on protected routes.
//! Verification is pure computation: recompute the signature, check
//! expiry. There is no session store to consult.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::token::TokenSigner;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub signer: Arc<TokenSigner>,
}

/// Middleware that requires a valid bearer access token
///
/// On success the decoded [`platform::token::Claims`] are inserted
/// into request extensions for downstream handlers.
pub async fn require_access_token(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let claims = bearer_token(req.headers()).and_then(|t| state.signer.verify(t).ok());

    let claims = match claims {
        Some(claims) => claims,
        None => {
            return Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response());
        }
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
