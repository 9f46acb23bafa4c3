//! API routes, nested under `/api` by `axum_helpers::create_router`.

pub mod brands;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", users::auth_router(state))
        .nest("/users", users::router(state))
        .nest("/brands", brands::router(state))
        .nest("/categories", categories::router(state))
        .nest("/products", products::router(state))
        .nest("/orders", orders::router(state))
}

/// Creates the unique and lookup indexes every collection relies on.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(&state.db).await?;
    brands::init_indexes(&state.db).await?;
    categories::init_indexes(&state.db).await?;
    products::init_indexes(&state.db).await?;
    orders::init_indexes(&state.db).await?;
    Ok(())
}
