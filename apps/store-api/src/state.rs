//! Shared application state.

use axum_helpers::JwtAuth;
use image_store::ImageStore;
use mongodb::{Client, Database};
use std::sync::Arc;

/// Built once in `main` and handed to every router.
///
/// Clones are cheap: the client shares its connection pool, the token
/// strategy shares its keys and the image store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
    pub auth: JwtAuth,
    pub images: Arc<dyn ImageStore>,
}
