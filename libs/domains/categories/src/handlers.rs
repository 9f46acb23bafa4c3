//! HTTP handlers for Categories API

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

use crate::error::CategoryResult;
use crate::models::{CategoryInput, CategoryResponse};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

const ADMIN: &[Role] = &[Role::Admin];

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, get_category, create_category, update_category, delete_category),
    components(
        schemas(CategoryInput, CategoryResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Category management endpoints")
    )
)]
pub struct ApiDoc;

/// Categories router. Mutations require an ADMIN token.
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>, auth: &JwtAuth) -> Router {
    let by_id = || RequestSchema::new().object_id("id");

    Router::new()
        .route("/", get(list_categories))
        .route(
            "/{id}",
            RoutePipeline::new().validate(by_id()).apply(get(get_category)),
        )
        .route(
            "/add",
            RoutePipeline::new()
                .validate(RequestSchema::new().json::<CategoryInput>())
                .authorize(auth, ADMIN)
                .apply(post(create_category)),
        )
        .route(
            "/update/{id}",
            RoutePipeline::new()
                .validate(by_id().json::<CategoryInput>())
                .authorize(auth, ADMIN)
                .apply(put(update_category)),
        )
        .route(
            "/delete/{id}",
            RoutePipeline::new()
                .validate(by_id())
                .authorize(auth, ADMIN)
                .apply(delete(delete_category)),
        )
        .with_state(Arc::new(service))
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CategoryResult<Json<Vec<CategoryResponse>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ObjectId")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CategoryResult<Json<CategoryResponse>> {
    Ok(Json(service.get_category(id).await?.into()))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/add",
    tag = "Categories",
    request_body = CategoryInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Json(input): Json<CategoryInput>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ObjectId")),
    request_body = CategoryInput,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    Json(input): Json<CategoryInput>,
) -> CategoryResult<Json<CategoryResponse>> {
    Ok(Json(service.update_category(id, input).await?.into()))
}

/// Delete a category, returning it
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ObjectId")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Category deleted", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CategoryResult<Json<CategoryResponse>> {
    Ok(Json(service.delete_category(id).await?.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::repository::MockCategoryRepository;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum_helpers::JwtConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("categories-handler-test-secret-32-chars!").unwrap())
    }

    fn app(repo: MockCategoryRepository) -> Router {
        router(CategoryService::new(repo), &auth())
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
    async fn test_create_category_returns_201() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|input| Ok(Category::new(input)));

        let response = app(repo)
            .oneshot(post_json("/add", json!({ "name": "Laptops" }), Some(Role::Admin)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Laptops");
        assert_eq!(body["id"].as_str().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_create_duplicate_category_returns_409() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(Category::new(CategoryInput { name: name.to_string() }))));
        repo.expect_create().never();

        let response = app(repo)
            .oneshot(post_json("/add", json!({ "name": "Laptops" }), Some(Role::Admin)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["message"], "The category name already exist.");
    }

    #[tokio::test]
    async fn test_customer_cannot_create_category() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_create().never();

        let response = app(repo)
            .oneshot(post_json("/add", json!({ "name": "Laptops" }), Some(Role::Customer)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_name_rejected_before_auth() {
        let response = app(MockCategoryRepository::new())
            .oneshot(post_json("/add", json!({ "name": "Tv4" }), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["details"][0]["field"], "name");
        assert_eq!(body["details"][0]["message"], "The name must contain only letters.");
    }

    #[tokio::test]
    async fn test_get_unknown_category_returns_404() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repo)
            .oneshot(Request::get("/65a1f0c2e4b0a1b2c3d4e5f6").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "The category does not exist.");
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_storage() {
        let mut repo = MockCategoryRepository::new();
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
    async fn test_delete_returns_deleted_category() {
        let category = Category::new(CategoryInput { name: "Cameras".into() });
        let id = category.id;
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(move |_| Ok(Some(category.clone())));

        let request = Request::delete(format!("/delete/{}", id.to_hex()))
            .header(header::AUTHORIZATION, token(Role::Admin))
            .body(Body::empty())
            .unwrap();
        let response = app(repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], id.to_hex());
    }
}
