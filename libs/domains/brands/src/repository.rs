use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::BrandResult;
use crate::models::{Brand, BrandInput};

/// Persistence for brands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, input: BrandInput) -> BrandResult<Brand>;

    async fn get_by_id(&self, id: ObjectId) -> BrandResult<Option<Brand>>;

    /// Exact, case-sensitive match.
    async fn find_by_name(&self, name: &str) -> BrandResult<Option<Brand>>;

    async fn list(&self) -> BrandResult<Vec<Brand>>;

    /// Returns the updated brand, or `None` if `id` is unknown.
    async fn update(&self, id: ObjectId, input: BrandInput) -> BrandResult<Option<Brand>>;

    /// Returns the deleted brand, or `None` if `id` is unknown.
    async fn delete(&self, id: ObjectId) -> BrandResult<Option<Brand>>;
}
