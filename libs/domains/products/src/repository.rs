use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{PopulatedProduct, Product, ProductChanges};

/// Persistence for products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Exact, case-sensitive match.
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Every product with its brand and category resolved.
    async fn list_populated(&self) -> ProductResult<Vec<PopulatedProduct>>;

    /// Returns the updated product, or `None` if `id` is unknown. Images
    /// are left as they are.
    async fn update(&self, id: ObjectId, changes: ProductChanges) -> ProductResult<Option<Product>>;

    /// Returns the deleted product, or `None` if `id` is unknown.
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>>;
}
