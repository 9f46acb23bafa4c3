use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::is_duplicate_key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrandError {
    #[error("The brand does not exist.")]
    NotFound,

    #[error("The brand name already exist.")]
    NameTaken,

    #[error("Database error: {0}")]
    Database(String),
}

pub type BrandResult<T> = Result<T, BrandError>;

impl From<BrandError> for AppError {
    fn from(err: BrandError) -> Self {
        match err {
            BrandError::NotFound => AppError::NotFound(err.to_string()),
            BrandError::NameTaken => AppError::Conflict(err.to_string()),
            BrandError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BrandError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Unique index violations surface as a name conflict.
impl From<mongodb::error::Error> for BrandError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            BrandError::NameTaken
        } else {
            BrandError::Database(err.to_string())
        }
    }
}
