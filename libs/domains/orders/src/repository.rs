use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::OrderResult;
use crate::models::{Order, OrderChanges};

/// Persistence for orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, changes: OrderChanges) -> OrderResult<Order>;

    async fn get_by_id(&self, id: ObjectId) -> OrderResult<Option<Order>>;

    async fn list(&self) -> OrderResult<Vec<Order>>;

    /// Returns the updated order, or `None` if `id` is unknown.
    async fn update(&self, id: ObjectId, changes: OrderChanges) -> OrderResult<Option<Order>>;

    /// Returns the deleted order, or `None` if `id` is unknown.
    async fn delete(&self, id: ObjectId) -> OrderResult<Option<Order>>;
}
