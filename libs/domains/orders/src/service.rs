//! Order Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderChanges, OrderInput};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> OrderResult<Vec<Order>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: ObjectId) -> OrderResult<Order> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound)
    }

    /// Any client-sent total is dropped; the stored one is Σ price × quantity.
    #[instrument(skip(self, input), fields(customer = %input.customer))]
    pub async fn create_order(&self, input: OrderInput) -> OrderResult<Order> {
        self.repository.create(OrderChanges::try_from(input)?).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_order(&self, id: ObjectId, input: OrderInput) -> OrderResult<Order> {
        self.repository
            .update(id, OrderChanges::try_from(input)?)
            .await?
            .ok_or(OrderError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: ObjectId) -> OrderResult<Order> {
        self.repository.delete(id).await?.ok_or(OrderError::NotFound)
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
