//! Orders Domain
//!
//! Customer orders backed by MongoDB. The stored total is always
//! Σ price × quantity over the order's items.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{Order, OrderChanges, OrderInput, OrderItem, OrderItemInput, OrderResponse, order_total};
pub use crate::mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
