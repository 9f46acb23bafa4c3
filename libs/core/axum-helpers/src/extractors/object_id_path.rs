//! ObjectId path parameter extractor.

use crate::errors::{ErrorCode, error_response};
use crate::validation::rules::INVALID_OBJECT_ID;
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;

/// Parses the single path parameter of a route as a MongoDB [`ObjectId`].
///
/// Routes behind a [`RequestSchema`](crate::validation::RequestSchema) that
/// declares the parameter never reach the rejection branch; it covers
/// routes mounted without one.
///
/// ```ignore
/// async fn get_brand(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app = Router::new().route("/{id}", get(get_brand));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        ObjectId::parse_str(&id)
            .map(ObjectIdPath)
            .map_err(|_| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    INVALID_OBJECT_ID.to_string(),
                    ErrorCode::InvalidObjectId,
                )
            })
    }
}
