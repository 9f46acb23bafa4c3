use super::multipart::{FormSchema, MultipartForm};
use super::rules::INVALID_OBJECT_ID;
use super::shape::{JsonShape, conform};
use super::{FieldError, ValidationReport};
use crate::errors::AppError;
use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{FromRequest, FromRequestParts, Multipart, RawPathParams, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use validator::Validate;

/// Default ceiling for buffered request bodies.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

type BodyCheck = fn(Request) -> Pin<Box<dyn Future<Output = Vec<FieldError>> + Send>>;

/// What a route accepts.
///
/// Built once when the router is assembled and shared by every request:
///
/// ```ignore
/// let schema = RequestSchema::new()
///     .object_id("id")
///     .json::<UpdateBrand>();
/// ```
#[derive(Clone)]
pub struct RequestSchema {
    object_ids: Vec<&'static str>,
    body: Option<BodyCheck>,
    body_limit: usize,
}

impl Default for RequestSchema {
    fn default() -> Self {
        Self {
            object_ids: Vec::new(),
            body: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl RequestSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path parameter `name` must be a 24-character hex ObjectId.
    pub fn object_id(mut self, name: &'static str) -> Self {
        self.object_ids.push(name);
        self
    }

    /// Body must be a JSON object matching `T`'s shape and rules.
    pub fn json<T>(mut self) -> Self
    where
        T: DeserializeOwned + Validate + JsonShape + Send + 'static,
    {
        self.body = Some(check_json::<T>);
        self
    }

    /// Body must be a multipart form accepted by `F::from_form`.
    pub fn multipart<F>(mut self) -> Self
    where
        F: FormSchema + Send + 'static,
    {
        self.body = Some(check_multipart::<F>);
        self
    }

    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    fn check_params(&self, params: &RawPathParams) -> Vec<FieldError> {
        self.object_ids
            .iter()
            .filter_map(|name| {
                let value = params.iter().find(|(key, _)| key == name).map(|(_, v)| v);
                match value {
                    Some(value) if ObjectId::parse_str(value).is_ok() => None,
                    Some(_) => Some(FieldError::new(*name, INVALID_OBJECT_ID)),
                    None => Some(FieldError::new(*name, format!("The {name} is required."))),
                }
            })
            .collect()
    }
}

fn check_json<T>(request: Request) -> Pin<Box<dyn Future<Output = Vec<FieldError>> + Send>>
where
    T: DeserializeOwned + Validate + JsonShape + Send + 'static,
{
    Box::pin(async move {
        if !is_json(request.headers()) {
            return vec![FieldError::new("body", "The body must be sent as application/json.")];
        }
        match Bytes::from_request(request, &()).await {
            Ok(bytes) => inspect_json::<T>(&bytes).errors().to_vec(),
            Err(rejection) => vec![FieldError::new("body", rejection.body_text())],
        }
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

/// Every violation in a JSON body, in one pass.
///
/// Only unparseable JSON or a non-object body yields the single `body`
/// error. Shape violations come first; `validator` rules then run on the
/// patched body and are kept for fields the shape did not already report.
pub fn inspect_json<T>(bytes: &[u8]) -> ValidationReport
where
    T: DeserializeOwned + Validate + JsonShape,
{
    let mut value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(_) => return ValidationReport::new(vec![FieldError::new("body", "The body must be valid JSON.")]),
    };
    let Some(object) = value.as_object_mut() else {
        return ValidationReport::new(vec![FieldError::new("body", "The body must be a JSON object.")]);
    };

    let mut report = ValidationReport::new(conform(object, T::FIELDS));

    match serde_json::from_value::<T>(value) {
        Ok(body) => {
            if let Err(errors) = body.validate() {
                let rules = ValidationReport::from(&errors);
                let extra: Vec<FieldError> = rules
                    .errors()
                    .iter()
                    .filter(|e| !report.covers(&e.field))
                    .cloned()
                    .collect();
                report.extend(extra);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Conforming body failed to deserialize");
            if report.is_empty() {
                report.push(FieldError::new("body", "The body does not match the expected format."));
            }
        }
    }

    report
}

fn check_multipart<F>(request: Request) -> Pin<Box<dyn Future<Output = Vec<FieldError>> + Send>>
where
    F: FormSchema + Send + 'static,
{
    Box::pin(async move {
        let multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(rejection) => return vec![FieldError::new("body", rejection.body_text())],
        };
        match MultipartForm::read(multipart).await {
            Ok(form) => match F::from_form(&form) {
                Ok(_) => Vec::new(),
                Err(report) => report.errors().to_vec(),
            },
            Err(e) => vec![FieldError::new("body", e.to_string())],
        }
    })
}

/// A throwaway request carrying the original headers and extensions, so
/// body extractors see the same content type and body limit as the handler.
fn probe(parts: &Parts, bytes: axum::body::Bytes) -> Request {
    let mut request = Request::new(Body::from(bytes));
    *request.headers_mut() = parts.headers.clone();
    *request.extensions_mut() = parts.extensions.clone();
    request
}

/// Middleware enforcing a [`RequestSchema`].
///
/// Path and body are both checked before answering, so a single `400`
/// lists every violation. A valid request is forwarded with its original
/// body bytes.
pub async fn validate_request(
    State(schema): State<Arc<RequestSchema>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut report = ValidationReport::default();

    if !schema.object_ids.is_empty() {
        match RawPathParams::from_request_parts(&mut parts, &()).await {
            Ok(params) => report.extend(schema.check_params(&params)),
            Err(rejection) => return AppError::BadRequest(rejection.body_text()).into_response(),
        }
    }

    let body = match schema.body {
        None => body,
        Some(check) => {
            let bytes = match to_bytes(body, schema.body_limit).await {
                Ok(bytes) => bytes,
                Err(_) => {
                    return AppError::PayloadTooLarge(format!(
                        "The request body exceeds {} bytes.",
                        schema.body_limit
                    ))
                    .into_response();
                }
            };
            report.extend(check(probe(&parts, bytes.clone())).await);
            Body::from(bytes)
        }
    };

    if !report.is_empty() {
        tracing::debug!(path = %parts.uri.path(), %report, "Request rejected by schema");
        return AppError::Validation(report).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::shape::{Field, Kind};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Line {
        #[validate(range(min = 1.0, message = "The quantity must be at least 1."))]
        quantity: f64,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Basket {
        #[validate(length(min = 4, message = "The name must have at least 4 characters."))]
        name: String,
        #[validate(email(message = "The email is not valid."))]
        email: String,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    impl JsonShape for Basket {
        const FIELDS: &'static [Field] = &[
            Field::required("name", Kind::String),
            Field::required("email", Kind::String),
            Field::required("lines", Kind::List(&[Field::required("quantity", Kind::Number)])),
        ];
    }

    fn fields(body: &str) -> Vec<String> {
        inspect_json::<Basket>(body.as_bytes())
            .errors()
            .iter()
            .map(|e| e.field.clone())
            .collect()
    }

    #[test]
    fn test_missing_and_invalid_fields_are_reported_together() {
        let report = inspect_json::<Basket>(br#"{"email":"not-an-email","lines":[{"quantity":"two"},{"quantity":0}]}"#);
        let messages: Vec<(&str, &str)> = report
            .errors()
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect();

        assert_eq!(
            messages,
            [
                ("email", "The email is not valid."),
                ("lines[0].quantity", "The quantity must be a number."),
                ("lines[1].quantity", "The quantity must be at least 1."),
                ("name", "The name is required."),
            ]
        );
    }

    #[test]
    fn test_valid_body_has_no_violations() {
        assert!(fields(r#"{"name":"Weekly","email":"jane@store.io","lines":[{"quantity":2}]}"#).is_empty());
    }

    #[test]
    fn test_only_unparseable_or_non_object_bodies_collapse() {
        assert_eq!(fields(r#"{"name":"#), ["body"]);
        assert_eq!(fields("[1, 2]"), ["body"]);
        assert_eq!(fields("{}"), ["email", "lines", "name"]);
    }

    #[test]
    fn test_messages_do_not_leak_parser_details() {
        let report = inspect_json::<Basket>(b"{\"name\":");
        assert_eq!(report.errors()[0].message, "The body must be valid JSON.");
    }
}
