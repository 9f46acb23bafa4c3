//! Brands Domain
//!
//! Brand catalogue backed by MongoDB. Brand names are unique.
//!
//! ```text
//! handlers ─► service ─► repository (trait + MongoDB) ─► models
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_brands::{handlers, BrandService, MongoBrandRepository};
//! # use axum_helpers::{JwtAuth, JwtConfig};
//!
//! # async fn example(db: mongodb::Database, auth: JwtAuth) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoBrandRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(BrandService::new(repository), &auth);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{BrandError, BrandResult};
pub use handlers::ApiDoc;
pub use models::{Brand, BrandInput, BrandResponse};
pub use crate::mongodb::MongoBrandRepository;
pub use repository::BrandRepository;
pub use service::BrandService;
