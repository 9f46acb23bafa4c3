//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, oid::ObjectId, to_bson},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderChanges};
use crate::repository::OrderRepository;

pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Order>("orders"),
        }
    }

    /// Index on `customer` for per-customer lookups.
    pub async fn init_indexes(&self) -> OrderResult<()> {
        self.collection
            .create_index(IndexModel::builder().keys(doc! { "customer": 1 }).build())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, changes), fields(items = changes.items.len()))]
    async fn create(&self, changes: OrderChanges) -> OrderResult<Order> {
        let order = Order::new(changes);
        self.collection.insert_one(&order).await?;

        tracing::info!(order_id = %order.id, customer = %order.customer, total = order.total, "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> OrderResult<Option<Order>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> OrderResult<Vec<Order>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: OrderChanges) -> OrderResult<Option<Order>> {
        let items = to_bson(&changes.items).map_err(|e| OrderError::Database(e.to_string()))?;
        let mut set = doc! {
            "customer": changes.customer,
            "items": items,
            "total": changes.total(),
            "updated_at": Utc::now().to_rfc3339(),
        };
        if let Some(is_cancel) = changes.is_cancel {
            set.insert("is_cancel", is_cancel);
        }

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(order_id = %id, "Order updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> OrderResult<Option<Order>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(order_id = %id, "Order deleted");
        }
        Ok(deleted)
    }
}
