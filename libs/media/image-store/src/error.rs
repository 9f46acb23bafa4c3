use thiserror::Error;

pub type ImageStoreResult<T> = Result<T, ImageStoreError>;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Image store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}
