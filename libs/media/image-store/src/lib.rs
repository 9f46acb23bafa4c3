//! Image store collaborator.
//!
//! Products keep their pictures in an external store. The [`ImageStore`]
//! trait is the seam the products domain depends on; [`CloudinaryImageStore`]
//! implements it against the Cloudinary upload API.
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use image_store::{CloudinaryConfig, CloudinaryImageStore, ImageStore, ImageUpload};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CloudinaryImageStore::new(CloudinaryConfig::from_env()?)?;
//! let image = ImageUpload::new("front.png", "image/png", std::fs::read("front.png")?);
//! let stored = store.upload(image).await?;
//! store.delete(&stored.public_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod cloudinary;
pub mod config;
pub mod error;
pub mod models;

pub use cloudinary::CloudinaryImageStore;
pub use config::CloudinaryConfig;
pub use error::{ImageStoreError, ImageStoreResult};
pub use models::{ImageUpload, StoredImage};

use async_trait::async_trait;

/// Remote storage for product images.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image and returns its remote handle.
    async fn upload(&self, image: ImageUpload) -> ImageStoreResult<StoredImage>;

    /// Removes a previously uploaded image.
    async fn delete(&self, public_id: &str) -> ImageStoreResult<()>;
}
