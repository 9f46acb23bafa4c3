//! Category Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryInput};
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: ObjectId) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// Fails with `NameTaken` if another category already uses the name.
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> CategoryResult<Category> {
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(CategoryError::NameTaken);
        }

        self.repository.create(input).await
    }

    /// Keeping its own name is not a conflict.
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn update_category(&self, id: ObjectId, input: CategoryInput) -> CategoryResult<Category> {
        self.get_category(id).await?;

        if let Some(other) = self.repository.find_by_name(&input.name).await? {
            if other.id != id {
                return Err(CategoryError::NameTaken);
            }
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: ObjectId) -> CategoryResult<Category> {
        self.repository.delete(id).await?.ok_or(CategoryError::NotFound)
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
