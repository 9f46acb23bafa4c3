//! Users Domain
//!
//! Credential records, the credential service (Argon2 hashing and token
//! issuance) and the register/login flow. Emails are unique.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /users (ADMIN) and /auth (public)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← uniqueness, hashing, login
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, inputs, responses
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, CredentialService, MongoUserRepository, UserService};
//! # use axum_helpers::JwtAuth;
//!
//! # async fn example(db: mongodb::Database, auth: JwtAuth) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MongoUserRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let service = UserService::new(repository, CredentialService::new(auth.clone()));
//! let users = handlers::router(service.clone(), &auth);
//! let auth_routes = handlers::auth_router(service);
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use credentials::{CredentialService, hash_password, verify_password};
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthApiDoc};
pub use models::{
    AuthResponse, LoginInput, Profile, RegisterInput, User, UserChanges, UserInput, UserResponse,
};
pub use crate::mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
