//! Products API routes
//!
//! The image store is built once in `main`; every product service clone
//! shares it.

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};
use mongodb::Database;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository, Arc::clone(&state.images));

    handlers::router(service, &state.auth)
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoProductRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    info!("Product collection indexes created");
    Ok(())
}
