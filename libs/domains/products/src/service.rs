//! Product Service - catalogue writes and image bookkeeping

use image_store::{ImageStore, ImageUpload, StoredImage};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{PopulatedProduct, Product, ProductChanges, ProductInput};
use crate::repository::ProductRepository;

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    images: Arc<dyn ImageStore>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, images: Arc<dyn ImageStore>) -> Self {
        Self {
            repository: Arc::new(repository),
            images,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<PopulatedProduct>> {
        self.repository.list_populated().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Uploads `images` in order, then stores the product with their
    /// handles. Images already uploaded stay in the store if a later
    /// step fails.
    #[instrument(skip(self, input, images), fields(product_name = %input.name, images = images.len()))]
    pub async fn create_product(
        &self,
        input: ProductInput,
        images: Vec<ImageUpload>,
    ) -> ProductResult<Product> {
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(ProductError::NameTaken);
        }
        let changes = ProductChanges::try_from(input)?;

        let mut stored: Vec<StoredImage> = Vec::with_capacity(images.len());
        for image in images {
            let file_name = image.file_name.clone();
            let handle = self.images.upload(image).await.inspect_err(|e| {
                tracing::error!(%file_name, uploaded = stored.len(), error = %e, "Image upload failed");
            })?;
            stored.push(handle);
        }

        self.repository.create(Product::new(changes, stored)).await
    }

    /// Keeping its own name is not a conflict. Images are untouched.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn update_product(&self, id: ObjectId, input: ProductInput) -> ProductResult<Product> {
        self.get_product(id).await?;

        if let Some(other) = self.repository.find_by_name(&input.name).await? {
            if other.id != id {
                return Err(ProductError::NameTaken);
            }
        }

        let changes = ProductChanges::try_from(input)?;
        self.repository
            .update(id, changes)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Deletes every image, in order, before the record. The first failed
    /// image deletion aborts the request and leaves the record in place.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<Product> {
        let product = self.get_product(id).await?;

        for image in &product.images {
            self.images.delete(&image.public_id).await.inspect_err(|e| {
                tracing::warn!(product_id = %id, public_id = %image.public_id, error = %e, "Image deletion failed");
            })?;
        }

        self.repository.delete(id).await?.ok_or(ProductError::NotFound)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            images: Arc::clone(&self.images),
        }
    }
}
