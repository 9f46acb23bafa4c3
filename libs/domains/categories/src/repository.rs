use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryInput};

/// Persistence for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CategoryInput) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>>;

    /// Exact, case-sensitive match.
    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>>;

    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Returns the updated category, or `None` if `id` is unknown.
    async fn update(&self, id: ObjectId, input: CategoryInput) -> CategoryResult<Option<Category>>;

    /// Returns the deleted category, or `None` if `id` is unknown.
    async fn delete(&self, id: ObjectId) -> CategoryResult<Option<Category>>;
}
