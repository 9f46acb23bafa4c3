//! Brand API routes

use axum::Router;
use domain_brands::{BrandService, MongoBrandRepository, handlers};
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoBrandRepository::new(&state.db);
    let service = BrandService::new(repository);

    handlers::router(service, &state.auth)
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoBrandRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create brand indexes: {}", e))?;
    info!("Brand collection indexes created");
    Ok(())
}
