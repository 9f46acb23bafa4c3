//! Brand Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, BrandInput};
use crate::repository::BrandRepository;

pub struct BrandService<R: BrandRepository> {
    repository: Arc<R>,
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> BrandResult<Vec<Brand>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: ObjectId) -> BrandResult<Brand> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(BrandError::NotFound)
    }

    /// Fails with `NameTaken` if another brand already uses the name.
    #[instrument(skip(self, input), fields(brand_name = %input.name))]
    pub async fn create_brand(&self, input: BrandInput) -> BrandResult<Brand> {
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(BrandError::NameTaken);
        }

        self.repository.create(input).await
    }

    /// Keeping its own name is not a conflict. An unknown id is reported
    /// before any name clash.
    #[instrument(skip(self, input), fields(brand_name = %input.name))]
    pub async fn update_brand(&self, id: ObjectId, input: BrandInput) -> BrandResult<Brand> {
        self.get_brand(id).await?;

        if let Some(other) = self.repository.find_by_name(&input.name).await? {
            if other.id != id {
                return Err(BrandError::NameTaken);
            }
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or(BrandError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: ObjectId) -> BrandResult<Brand> {
        self.repository.delete(id).await?.ok_or(BrandError::NotFound)
    }
}

impl<R: BrandRepository> Clone for BrandService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
