//! Stateless bearer-token authentication and role-based authorization.
//!
//! - [`JwtAuth`] signs and verifies identity tokens with a shared secret
//! - [`authenticate`] attaches the decoded [`IdentityClaim`] to a request
//! - [`require_roles`] rejects requests whose claim is absent or whose role
//!   is not allowed
//!
//! Claims carry no expiry and are never re-checked against the user store:
//! a role change takes effect only when a new token is issued.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let token = auth.issue(&user_id, &email, Role::Customer)?;
//! ```

pub mod claims;
pub mod config;
pub mod guard;
pub mod jwt;
pub mod middleware;

pub use claims::{IdentityClaim, Role};
pub use config::JwtConfig;
pub use guard::require_roles;
pub use jwt::JwtAuth;
pub use middleware::{authenticate, extract_bearer_token};
