//! # Axum Helpers
//!
//! Shared HTTP plumbing for the store services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT identity tokens, token strategy and role guard
//! - **[`validation`]**: declarative request schemas and field rules
//! - **[`pipeline`]**: per-route validation and authorization stages
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: ObjectId path extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{RoutePipeline, RequestSchema, Role, server::create_router};
//!
//! const ADMIN: &[Role] = &[Role::Admin];
//!
//! let api = Router::new().route(
//!     "/brands/add",
//!     RoutePipeline::new()
//!         .validate(RequestSchema::new().json::<CreateBrand>())
//!         .authorize(&jwt, ADMIN)
//!         .apply(post(create_brand)),
//! );
//! let router = create_router::<ApiDoc>(api)?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pipeline;
pub mod server;
pub mod validation;

pub use auth::{IdentityClaim, JwtAuth, JwtConfig, Role, authenticate, require_roles};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::ObjectIdPath;
pub use pipeline::RoutePipeline;
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
pub use validation::{
    Field, FieldError, FileRule, FormSchema, JsonShape, Kind, MultipartForm, RequestSchema,
    UploadedFile, ValidationReport,
};
