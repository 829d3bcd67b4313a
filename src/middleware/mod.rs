//! Auth gate: bearer-token, role and API-key guards.
//!
//! Guards are actix `Transform`s wrapped on route scopes. Actix runs the
//! last `wrap` first, so a role guard is wrapped before the bearer guard it
//! depends on.

pub mod api_key;
pub mod authentication;
pub mod authorization;
mod error;

pub use api_key::ApiKeyGuard;
pub use authentication::BearerAuth;
pub use authorization::RoleGuard;
pub use error::AuthError;
