use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::is_duplicate_key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("The category does not exist.")]
    NotFound,

    #[error("The category name already exist.")]
    NameTaken,

    #[error("Database error: {0}")]
    Database(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound => AppError::NotFound(err.to_string()),
            CategoryError::NameTaken => AppError::Conflict(err.to_string()),
            CategoryError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Unique index violations surface as a name conflict.
impl From<mongodb::error::Error> for CategoryError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            CategoryError::NameTaken
        } else {
            CategoryError::Database(err.to_string())
        }
    }
}
