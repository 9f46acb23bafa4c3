use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::is_duplicate_key;
use image_store::ImageStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("The product does not exist.")]
    NotFound,

    #[error("The product name already exist.")]
    NameTaken,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image store error: {0}")]
    ImageStore(#[from] ImageStoreError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => AppError::NotFound(err.to_string()),
            ProductError::NameTaken => AppError::Conflict(err.to_string()),
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::ImageStore(_) => AppError::InternalServerError(err.to_string()),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Unique index violations surface as a name conflict.
impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            ProductError::NameTaken
        } else {
            ProductError::Database(err.to_string())
        }
    }
}
