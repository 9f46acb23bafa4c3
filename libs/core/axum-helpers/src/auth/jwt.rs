use super::claims::{IdentityClaim, Role};
use super::config::JwtConfig;
use crate::errors::AppError;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;

/// Signs and verifies HS256 identity tokens.
///
/// Keys are derived once from the configured secret; clones share them.
#[derive(Clone)]
pub struct JwtAuth {
    inner: Arc<Keys>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    /// Builds the signer from configuration.
    ///
    /// ```ignore
    /// use axum_helpers::auth::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let auth = JwtAuth::new(&JwtConfig::from_env()?);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        // Tokens carry no `exp`; a valid signature is enough.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        tracing::info!("JWT auth initialized");
        Self {
            inner: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    /// Issues a token for `subject`, stamped with the current time.
    pub fn issue(&self, subject: &str, name: &str, role: Role) -> Result<String, AppError> {
        let claims = IdentityClaim {
            sub: subject.to_string(),
            name: name.to_string(),
            role,
            iat: Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding).map_err(|e| {
            AppError::InternalServerError(format!("Failed to sign token: {e}"))
        })
    }

    /// Verifies the signature and returns the embedded claim.
    pub fn decode(&self, token: &str) -> Result<IdentityClaim, AppError> {
        decode::<IdentityClaim>(token, &self.inner.decoding, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token verification failed: {}", e);
                AppError::Unauthorized("Invalid token".to_string())
            })
    }
}
