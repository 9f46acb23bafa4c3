//! Users and authentication routes

use axum::Router;
use domain_users::{CredentialService, MongoUserRepository, UserService, handlers};
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

fn service(state: &AppState) -> UserService<MongoUserRepository> {
    let repository = MongoUserRepository::new(&state.db);
    UserService::new(repository, CredentialService::new(state.auth.clone()))
}

/// Admin-only user management
pub fn router(state: &AppState) -> Router {
    handlers::router(service(state), &state.auth)
}

/// Public `/register` and `/login`
pub fn auth_router(state: &AppState) -> Router {
    handlers::auth_router(service(state))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoUserRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
