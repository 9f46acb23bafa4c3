//! HTTP handlers for Orders API

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
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{OrderInput, OrderItem, OrderItemInput, OrderResponse};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// Orders may be written by staff and by customers.
const BUYERS: &[Role] = &[Role::Admin, Role::Customer];

#[derive(OpenApi)]
#[openapi(
    paths(list_orders, get_order, create_order, update_order, delete_order),
    components(
        schemas(OrderInput, OrderItemInput, OrderItem, OrderResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order endpoints")
    )
)]
pub struct ApiDoc;

/// Orders router. Mutations require an ADMIN or CUSTOMER token.
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>, auth: &JwtAuth) -> Router {
    let by_id = || RequestSchema::new().object_id("id");

    Router::new()
        .route("/", get(list_orders))
        .route(
            "/{id}",
            RoutePipeline::new().validate(by_id()).apply(get(get_order)),
        )
        .route(
            "/add",
            RoutePipeline::new()
                .validate(RequestSchema::new().json::<OrderInput>())
                .authorize(auth, BUYERS)
                .apply(post(create_order)),
        )
        .route(
            "/update/{id}",
            RoutePipeline::new()
                .validate(by_id().json::<OrderInput>())
                .authorize(auth, BUYERS)
                .apply(put(update_order)),
        )
        .route(
            "/delete/{id}",
            RoutePipeline::new()
                .validate(by_id())
                .authorize(auth, BUYERS)
                .apply(delete(delete_order)),
        )
        .with_state(Arc::new(service))
}

/// List all orders
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
) -> OrderResult<Json<Vec<OrderResponse>>> {
    let orders = service.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order ObjectId")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> OrderResult<Json<OrderResponse>> {
    Ok(Json(service.get_order(id).await?.into()))
}

/// Place an order; the total is computed from the items
#[utoipa::path(
    post,
    path = "/add",
    tag = "Orders",
    request_body = OrderInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Json(input): Json<OrderInput>,
) -> OrderResult<impl IntoResponse> {
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// Update an order; the total is recomputed
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order ObjectId")),
    request_body = OrderInput,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    Json(input): Json<OrderInput>,
) -> OrderResult<Json<OrderResponse>> {
    Ok(Json(service.update_order(id, input).await?.into()))
}

/// Delete an order, returning it
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order ObjectId")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Order deleted", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> OrderResult<Json<OrderResponse>> {
    Ok(Json(service.delete_order(id).await?.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Order;
    use crate::repository::MockOrderRepository;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum_helpers::JwtConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("orders-handler-test-secret-32-chars!").unwrap())
    }

    fn app(repo: MockOrderRepository) -> Router {
        router(OrderService::new(repo), &auth())
    }

    fn post_order(body: Value, role: Option<Role>) -> Request<Body> {
        let mut builder = Request::post("/add").header(header::CONTENT_TYPE, "application/json");
        if let Some(role) = role {
            let token = auth().issue("65a1f0c2e4b0a1b2c3d4e5f6", "jane@store.io", role).unwrap();
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn order_body() -> Value {
        json!({
            "customer": "65a1f0c2e4b0a1b2c3d4e5f6",
            "items": [
                { "name": "Pavilion 15", "price": 10, "quantity": 2 },
                { "name": "Mouse pad", "price": 5, "quantity": 1 }
            ],
            "total": 1
        })
    }

    async fn send(request: Request<Body>, repo: MockOrderRepository) -> (StatusCode, Value) {
        let response = app(repo).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_customer_places_order_with_computed_total() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|changes| Ok(Order::new(changes)));

        let (status, body) = send(post_order(order_body(), Some(Role::Customer)), repo).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["total"], 25.0);
        assert_eq!(body["isCancel"], false);
    }

    #[tokio::test]
    async fn test_anonymous_and_forged_tokens_get_same_403() {
        let anonymous = send(post_order(order_body(), None), MockOrderRepository::new()).await;

        let forged = Request::post("/add")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(Body::from(order_body().to_string()))
            .unwrap();
        let forged = send(forged, MockOrderRepository::new()).await;

        assert_eq!(anonymous.0, StatusCode::FORBIDDEN);
        assert_eq!(anonymous, forged);
    }

    #[tokio::test]
    async fn test_invalid_items_are_reported_with_paths() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create().never();

        let body = json!({
            "customer": "65a1f0c2e4b0a1b2c3d4e5f6",
            "items": [
                { "name": "Pavilion 15", "price": 10, "quantity": 2 },
                { "name": "Pad", "price": -5, "quantity": 1 }
            ]
        });
        let (status, body) = send(post_order(body, Some(Role::Customer)), repo).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["items[1].name", "items[1].price"]);
    }

    #[tokio::test]
    async fn test_reads_are_public() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list().returning(|| Ok(Vec::new()));

        let (status, body) = send(Request::get("/").body(Body::empty()).unwrap(), repo).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
