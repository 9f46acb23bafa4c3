//! Password hashing and token issuance.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;

use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, User};

/// Argon2 with default parameters and a random salt, as a PHC string.
pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// A digest that does not parse never matches.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        tracing::warn!("Stored password digest is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Signs identity tokens for authenticated users.
#[derive(Clone)]
pub struct CredentialService {
    auth: JwtAuth,
}

impl CredentialService {
    pub fn new(auth: JwtAuth) -> Self {
        Self { auth }
    }

    /// Token payload is `{sub: id, name: email, role, iat}`.
    pub fn issue(&self, user: &User) -> UserResult<AuthResponse> {
        let id = user.id.to_hex();
        let token = self
            .auth
            .issue(&id, &user.email, user.role)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(AuthResponse {
            id,
            email: user.email.clone(),
            role: user.role,
            profile: user.profile.clone(),
            token,
        })
    }
}
