//! Per-route middleware pipeline.
//!
//! A route declares what it accepts and who may call it; the pipeline turns
//! that into layers that run in a fixed order:
//!
//! 1. schema validation (`400` listing every violation)
//! 2. token strategy (attaches the identity claim, never rejects)
//! 3. role guard (`403` for a missing claim or a disallowed role)
//! 4. the handler
//!
//! A malformed request is therefore reported as `400` even when the caller
//! is anonymous.
//!
//! ```ignore
//! const ADMIN: &[Role] = &[Role::Admin];
//!
//! let router = Router::new().route(
//!     "/update/{id}",
//!     RoutePipeline::new()
//!         .validate(RequestSchema::new().object_id("id").json::<UpdateBrand>())
//!         .authorize(&auth, ADMIN)
//!         .apply(put(update_brand)),
//! );
//! ```

use crate::auth::{JwtAuth, Role, authenticate, require_roles};
use crate::validation::{RequestSchema, validate_request};
use axum::middleware::from_fn_with_state;
use axum::routing::MethodRouter;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct RoutePipeline {
    schema: Option<RequestSchema>,
    access: Option<(JwtAuth, &'static [Role])>,
}

impl RoutePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(mut self, schema: RequestSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Restricts the route to callers whose token carries one of `roles`.
    pub fn authorize(mut self, auth: &JwtAuth, roles: &'static [Role]) -> Self {
        self.access = Some((auth.clone(), roles));
        self
    }

    /// Wraps `route` with the configured stages.
    pub fn apply<S>(self, mut route: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // route_layer wraps what came before, so stages are added innermost first.
        if let Some((auth, roles)) = self.access {
            route = route
                .route_layer(from_fn_with_state(roles, require_roles))
                .route_layer(from_fn_with_state(auth, authenticate));
        }
        if let Some(schema) = self.schema {
            route = route.route_layer(from_fn_with_state(Arc::new(schema), validate_request));
        }
        route
    }
}
