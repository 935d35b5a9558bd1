//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Credential store implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Account signup with email + password
//! - Password login issuing stateless signed access tokens
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (memory-hard, internally salted)
//! - Access tokens are HMAC-SHA256 signed claim sets with a fixed
//!   15 minute lifetime
//! - Unknown email and wrong password are indistinguishable to callers
//! - Email uniqueness is enforced by the storage constraint, never a
//!   pre-check

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgCredentialStore;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
