//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    AppError, FormSchema, JwtAuth, MultipartForm, ObjectIdPath, RequestSchema, Role, RoutePipeline,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use image_store::StoredImage;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductResult;
use crate::models::{
    PopulatedProductResponse, ProductForm, ProductInput, ProductResponse, ReferenceResponse,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const ADMIN: &[Role] = &[Role::Admin];

/// Ceiling for a whole product form, images included.
pub const MAX_FORM_BYTES: usize = 32 * 1024 * 1024;

/// Documentation shape of the `POST /products/add` form.
#[derive(ToSchema)]
#[allow(dead_code)]
struct ProductUpload {
    name: String,
    description: String,
    stock: f64,
    price: f64,
    brand: String,
    category: String,
    /// JPEG or PNG, at most 5MB each
    #[schema(value_type = Vec<String>, format = Binary)]
    images: Vec<Vec<u8>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product, create_product, update_product, delete_product),
    components(
        schemas(
            ProductInput,
            ProductUpload,
            ProductResponse,
            PopulatedProductResponse,
            ReferenceResponse,
            StoredImage
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Products router. Mutations require an ADMIN token.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, auth: &JwtAuth) -> Router {
    let by_id = || RequestSchema::new().object_id("id");

    Router::new()
        .route("/", get(list_products))
        .route(
            "/{id}",
            RoutePipeline::new().validate(by_id()).apply(get(get_product)),
        )
        .route(
            "/add",
            RoutePipeline::new()
                .validate(
                    RequestSchema::new()
                        .multipart::<ProductForm>()
                        .body_limit(MAX_FORM_BYTES),
                )
                .authorize(auth, ADMIN)
                .apply(post(create_product))
                .layer(DefaultBodyLimit::max(MAX_FORM_BYTES)),
        )
        .route(
            "/update/{id}",
            RoutePipeline::new()
                .validate(by_id().json::<ProductInput>())
                .authorize(auth, ADMIN)
                .apply(put(update_product)),
        )
        .route(
            "/delete/{id}",
            RoutePipeline::new()
                .validate(by_id())
                .authorize(auth, ADMIN)
                .apply(delete(delete_product)),
        )
        .with_state(Arc::new(service))
}

/// List all products with brand and category populated
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<PopulatedProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<PopulatedProductResponse>>> {
    let products = service.list_products().await?;
    Ok(Json(products.into_iter().map(PopulatedProductResponse::from).collect()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<ProductResponse>> {
    Ok(Json(service.get_product(id).await?.into()))
}

/// Create a product, uploading its images
#[utoipa::path(
    post,
    path = "/add",
    tag = "Products",
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = MultipartForm::read(multipart).await?;
    let ProductForm { input, images } = ProductForm::from_form(&form)?;

    let product = service.create_product(input, images).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Update a product's fields; images are kept
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId")),
    request_body = ProductInput,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    Json(input): Json<ProductInput>,
) -> ProductResult<Json<ProductResponse>> {
    Ok(Json(service.update_product(id, input).await?.into()))
}

/// Delete a product and its images, returning it
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product deleted", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<ProductResponse>> {
    Ok(Json(service.delete_product(id).await?.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{DESCRIPTION, product};
    use crate::models::{NamedRef, PopulatedProduct};
    use crate::repository::MockProductRepository;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum_helpers::JwtConfig;
    use http_body_util::BodyExt;
    use image_store::MockImageStore;
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("products-handler-test-secret-32chars").unwrap())
    }

    fn app(repo: MockProductRepository, images: MockImageStore) -> Router {
        router(ProductService::new(repo, Arc::new(images)), &auth())
    }

    fn token(role: Role) -> String {
        format!("Bearer {}", auth().issue("65a1f0c2e4b0a1b2c3d4e5f6", "root@store.io", role).unwrap())
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart(parts: &[Part], role: Role) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(b"--BOUNDARY\r\n");
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}").as_bytes(),
                    );
                }
                Part::File(file_name, content_type, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"images\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(b"--BOUNDARY--\r\n");

        Request::post("/add")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .header(header::AUTHORIZATION, token(role))
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_multipart_create_returns_201_with_images() {
        let brand = ObjectId::new().to_hex();
        let category = ObjectId::new().to_hex();

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(Ok);
        let mut images = MockImageStore::new();
        images.expect_upload().times(1).returning(|image| {
            Ok(StoredImage {
                public_id: format!("store/{}", image.file_name),
                secure_url: "https://res.cloudinary.com/demo/front.png".into(),
            })
        });

        let request = multipart(
            &[
                Part::Text("name", "Pavilion 15"),
                Part::Text("description", DESCRIPTION),
                Part::Text("stock", "12"),
                Part::Text("price", "799.90"),
                Part::Text("brand", &brand),
                Part::Text("category", &category),
                Part::File("front.png", "image/png", b"png"),
            ],
            Role::Admin,
        );
        let response = app(repo, images).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["stock"], 12.0);
        assert_eq!(body["brand"], brand);
        assert_eq!(body["images"][0]["publicId"], "store/front.png");
    }

    #[tokio::test]
    async fn test_multipart_create_reports_fields_and_files() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();
        let mut images = MockImageStore::new();
        images.expect_upload().never();

        let request = multipart(
            &[
                Part::Text("name", "Pavilion 15"),
                Part::Text("description", DESCRIPTION),
                Part::Text("stock", "a dozen"),
                Part::Text("price", "-3"),
                Part::Text("brand", "not-an-id"),
                Part::Text("category", "65a1f0c2e4b0a1b2c3d4e5f7"),
                Part::File("manual.pdf", "application/pdf", b"%PDF"),
            ],
            Role::Admin,
        );
        let response = app(repo, images).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        let details: Vec<(&str, &str)> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| (e["field"].as_str().unwrap(), e["message"].as_str().unwrap()))
            .collect();
        assert_eq!(
            details,
            [
                ("brand", "The id is not a valid ObjectId."),
                ("images", "The file manual.pdf only accept image/jpeg, image/jpg, image/png."),
                ("price", "The price must not be negative."),
                ("stock", "The stock must be a number."),
            ]
        );
    }

    #[tokio::test]
    async fn test_json_update_lists_missing_mistyped_and_invalid_fields() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let body = serde_json::json!({
            "name": "Pavilion",
            "description": DESCRIPTION,
            "stock": "many",
            "price": -1,
            "brand": "65a1f0c2e4b0a1b2c3d4e5f6"
        });
        let request = Request::put("/update/65a1f0c2e4b0a1b2c3d4e5f6")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, token(Role::Admin))
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app(repo, MockImageStore::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["details"],
            serde_json::json!([
                { "field": "category", "message": "The category is required." },
                { "field": "price", "message": "The price must not be negative." },
                { "field": "stock", "message": "The stock must be a number." }
            ])
        );
    }

    #[tokio::test]
    async fn test_get_unknown_product_returns_404() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repo, MockImageStore::new())
            .oneshot(Request::get("/65a1f0c2e4b0a1b2c3d4e5f6").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "The product does not exist.");
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();

        let response = app(repo, MockImageStore::new())
            .oneshot(Request::get("/123").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_populates_references() {
        let stored = product("Pavilion");
        let populated = PopulatedProduct {
            id: stored.id,
            name: stored.name,
            description: stored.description,
            stock: stored.stock,
            price: stored.price,
            brand: Some(NamedRef { id: stored.brand, name: "HP".into() }),
            category: None,
            images: Vec::new(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        };
        let mut repo = MockProductRepository::new();
        repo.expect_list_populated()
            .returning(move || Ok(vec![populated.clone()]));

        let response = app(repo, MockImageStore::new())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["brand"]["name"], "HP");
        assert_eq!(body[0]["brand"]["id"], stored.brand.to_hex());
        assert!(body[0]["category"].is_null());
    }

    #[tokio::test]
    async fn test_customer_cannot_delete_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_delete().never();

        let request = Request::delete("/delete/65a1f0c2e4b0a1b2c3d4e5f6")
            .header(header::AUTHORIZATION, token(Role::Customer))
            .body(Body::empty())
            .unwrap();
        let response = app(repo, MockImageStore::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
