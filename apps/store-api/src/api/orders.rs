//! Order API routes

use axum::Router;
use domain_orders::{OrderService, MongoOrderRepository, handlers};
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoOrderRepository::new(&state.db);
    let service = OrderService::new(repository);

    handlers::router(service, &state.auth)
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoOrderRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create order indexes: {}", e))?;
    info!("Order collection indexes created");
    Ok(())
}
