use super::jwt::JwtAuth;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Token strategy middleware.
///
/// Never rejects: a verified token puts its [`IdentityClaim`] into the
/// request extensions, anything else leaves the request anonymous for the
/// role guard to decide.
///
/// [`IdentityClaim`]: super::IdentityClaim
pub async fn authenticate(State(auth): State<JwtAuth>, mut request: Request, next: Next) -> Response {
    let claim = extract_bearer_token(request.headers()).and_then(|token| auth.decode(token).ok());

    match claim {
        Some(claim) => {
            tracing::debug!(sub = %claim.sub, role = %claim.role, "Authenticated request");
            request.extensions_mut().insert(claim);
        }
        None => tracing::debug!("No valid bearer token"),
    }

    next.run(request).await
}
