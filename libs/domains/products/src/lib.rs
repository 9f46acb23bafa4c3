//! Products Domain
//!
//! Product catalogue backed by MongoDB, with pictures held by an external
//! [`image_store::ImageStore`]. Product names are unique; listing resolves
//! the brand and category references.
//!
//! ```text
//! handlers ─► service ─┬─► repository (trait + MongoDB) ─► models
//!                      └─► ImageStore (upload / delete)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use image_store::ImageStore;
//! use std::sync::Arc;
//! # use axum_helpers::JwtAuth;
//!
//! # async fn example(db: mongodb::Database, auth: JwtAuth, images: Arc<dyn ImageStore>) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(ProductService::new(repository, images), &auth);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    NamedRef, PopulatedProduct, PopulatedProductResponse, Product, ProductChanges, ProductForm,
    ProductInput, ProductResponse,
};
pub use crate::mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
