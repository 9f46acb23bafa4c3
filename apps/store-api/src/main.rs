use axum_helpers::{JwtAuth, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use image_store::{CloudinaryImageStore, ImageStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(database = %config.mongodb.database, "Connecting to MongoDB");

    // Startup is the only place the connection is retried
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(&config.mongodb.database);

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database
    );

    let auth = JwtAuth::new(&config.jwt);
    let images: Arc<dyn ImageStore> =
        Arc::new(CloudinaryImageStore::new(config.cloudinary.clone())?);

    let state = AppState {
        config,
        mongo_client,
        db,
        auth,
        images,
    };

    api::init_indexes(&state).await?;

    let api_routes = api::routes(&state);

    let app = create_router::<openapi::ApiDoc>(api_routes)?
        .merge(api::health::router(state.clone()))
        .merge(health_router(state.config.app));

    info!("Starting Store API with graceful shutdown (30s timeout)");

    let mongo_client = state.mongo_client.clone();

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Store API shutdown complete");
    Ok(())
}
