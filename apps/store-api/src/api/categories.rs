//! Category API routes

use axum::Router;
use domain_categories::{CategoryService, MongoCategoryRepository, handlers};
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoCategoryRepository::new(&state.db);
    let service = CategoryService::new(repository);

    handlers::router(service, &state.auth)
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoCategoryRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create category indexes: {}", e))?;
    info!("Category collection indexes created");
    Ok(())
}
