//! Categories Domain
//!
//! Category catalogue backed by MongoDB. Category names are unique.
//!
//! Same layering as the other catalogue domains; see `domain_brands`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CategoryInput, CategoryResponse};
pub use crate::mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
