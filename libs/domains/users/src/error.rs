use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::is_duplicate_key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("The user does not exist.")]
    NotFound,

    #[error("The email user already exist.")]
    EmailTaken,

    /// Unknown email and wrong password are reported the same way.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::EmailTaken => AppError::Conflict(err.to_string()),
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::PasswordHash(msg) | UserError::Internal(msg) | UserError::Database(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// The unique index on `email` surfaces as a conflict.
impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            UserError::EmailTaken
        } else {
            UserError::Database(err.to_string())
        }
    }
}
