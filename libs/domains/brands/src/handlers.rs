//! HTTP handlers for Brands API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    JwtAuth, ObjectIdPath, RequestSchema, Role, RoutePipeline,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BrandResult;
use crate::models::{BrandInput, BrandResponse};
use crate::repository::BrandRepository;
use crate::service::BrandService;

const ADMIN: &[Role] = &[Role::Admin];

#[derive(OpenApi)]
#[openapi(
    paths(list_brands, get_brand, create_brand, update_brand, delete_brand),
    components(
        schemas(BrandInput, BrandResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Brands", description = "Brand management endpoints")
    )
)]
pub struct ApiDoc;

/// Brands router. Mutations require an ADMIN token.
pub fn router<R: BrandRepository + 'static>(service: BrandService<R>, auth: &JwtAuth) -> Router {
    let by_id = || RequestSchema::new().object_id("id");

    Router::new()
        .route("/", get(list_brands))
        .route(
            "/{id}",
            RoutePipeline::new().validate(by_id()).apply(get(get_brand)),
        )
        .route(
            "/add",
            RoutePipeline::new()
                .validate(RequestSchema::new().json::<BrandInput>())
                .authorize(auth, ADMIN)
                .apply(post(create_brand)),
        )
        .route(
            "/update/{id}",
            RoutePipeline::new()
                .validate(by_id().json::<BrandInput>())
                .authorize(auth, ADMIN)
                .apply(put(update_brand)),
        )
        .route(
            "/delete/{id}",
            RoutePipeline::new()
                .validate(by_id())
                .authorize(auth, ADMIN)
                .apply(delete(delete_brand)),
        )
        .with_state(Arc::new(service))
}

/// List all brands
#[utoipa::path(
    get,
    path = "",
    tag = "Brands",
    responses(
        (status = 200, description = "All brands", body = Vec<BrandResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
) -> BrandResult<Json<Vec<BrandResponse>>> {
    let brands = service.list_brands().await?;
    Ok(Json(brands.into_iter().map(BrandResponse::from).collect()))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Brands",
    params(("id" = String, Path, description = "Brand ObjectId")),
    responses(
        (status = 200, description = "Brand found", body = BrandResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> BrandResult<Json<BrandResponse>> {
    Ok(Json(service.get_brand(id).await?.into()))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "/add",
    tag = "Brands",
    request_body = BrandInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    Json(input): Json<BrandInput>,
) -> BrandResult<impl IntoResponse> {
    let brand = service.create_brand(input).await?;
    Ok((StatusCode::CREATED, Json(BrandResponse::from(brand))))
}

/// Update a brand
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Brands",
    params(("id" = String, Path, description = "Brand ObjectId")),
    request_body = BrandInput,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Brand updated", body = BrandResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    Json(input): Json<BrandInput>,
) -> BrandResult<Json<BrandResponse>> {
    Ok(Json(service.update_brand(id, input).await?.into()))
}

/// Delete a brand, returning it
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Brands",
    params(("id" = String, Path, description = "Brand ObjectId")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Brand deleted", body = BrandResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> BrandResult<Json<BrandResponse>> {
    Ok(Json(service.delete_brand(id).await?.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Brand;
    use crate::repository::MockBrandRepository;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum_helpers::JwtConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("brands-handler-test-secret-32-chars!").unwrap())
    }

    fn app(repo: MockBrandRepository) -> Router {
        router(BrandService::new(repo), &auth())
    }

    fn token(role: Role) -> String {
        format!("Bearer {}", auth().issue("65a1f0c2e4b0a1b2c3d4e5f6", "admin@store.io", role).unwrap())
    }

    fn post_json(uri: &str, body: Value, role: Option<Role>) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(role) = role {
            builder = builder.header(header::AUTHORIZATION, token(role));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_brand_returns_201() {
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|input| Ok(Brand::new(input)));

        let response = app(repo)
            .oneshot(post_json("/add", json!({ "name": "HP" }), Some(Role::Admin)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["name"], "HP");
        assert_eq!(body["id"].as_str().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_create_duplicate_brand_returns_409() {
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(Brand::new(BrandInput { name: name.to_string() }))));
        repo.expect_create().never();

        let response = app(repo)
            .oneshot(post_json("/add", json!({ "name": "HP" }), Some(Role::Admin)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["message"], "The brand name already exist.");
    }

    #[tokio::test]
    async fn test_customer_cannot_create_brand() {
        let mut repo = MockBrandRepository::new();
        repo.expect_create().never();

        let response = app(repo)
            .oneshot(post_json("/add", json!({ "name": "HP" }), Some(Role::Customer)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_name_rejected_before_auth() {
        let response = app(MockBrandRepository::new())
            .oneshot(post_json("/add", json!({ "name": "H1" }), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["details"][0]["field"], "name");
        assert_eq!(body["details"][0]["message"], "The name must contain only letters.");
    }

    #[tokio::test]
    async fn test_mistyped_or_missing_name_is_reported_per_field() {
        for (body, message) in [
            (json!({ "name": 5 }), "The name must be a string."),
            (json!({ "title": "HP" }), "The name is required."),
        ] {
            let response = app(MockBrandRepository::new())
                .oneshot(post_json("/add", body, Some(Role::Admin)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert_eq!(body["details"], json!([{ "field": "name", "message": message }]));
        }
    }

    #[tokio::test]
    async fn test_get_unknown_brand_returns_404() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repo)
            .oneshot(Request::get("/65a1f0c2e4b0a1b2c3d4e5f6").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "The brand does not exist.");
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_storage() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get_by_id().never();

        let response = app(repo)
            .oneshot(Request::get("/not-an-object-id").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["details"][0]["message"],
            "The id is not a valid ObjectId."
        );
    }

    #[tokio::test]
    async fn test_delete_returns_deleted_brand() {
        let brand = Brand::new(BrandInput { name: "Asus".into() });
        let id = brand.id;
        let mut repo = MockBrandRepository::new();
        repo.expect_delete().returning(move |_| Ok(Some(brand.clone())));

        let request = Request::delete(format!("/delete/{}", id.to_hex()))
            .header(header::AUTHORIZATION, token(Role::Admin))
            .body(Body::empty())
            .unwrap();
        let response = app(repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], id.to_hex());
    }
}
