use super::claims::{IdentityClaim, Role};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Role guard middleware.
///
/// Passes the request on only if [`authenticate`](super::authenticate)
/// attached a claim whose role is in `allowed`. A missing claim and a
/// disallowed role get the same `403`.
///
/// ```ignore
/// const ADMIN: &[Role] = &[Role::Admin];
/// let route = post(create).route_layer(from_fn_with_state(ADMIN, require_roles));
/// ```
pub async fn require_roles(
    State(allowed): State<&'static [Role]>,
    request: Request,
    next: Next,
) -> Response {
    match request.extensions().get::<IdentityClaim>() {
        Some(claim) if allowed.contains(&claim.role) => next.run(request).await,
        Some(claim) => {
            tracing::info!(sub = %claim.sub, role = %claim.role, "Role not allowed");
            AppError::forbidden().into_response()
        }
        None => AppError::forbidden().into_response(),
    }
}
