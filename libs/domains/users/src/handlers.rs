//! HTTP handlers for the users and auth endpoints

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
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginInput, Profile, RegisterInput, UserInput, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const ADMIN: &[Role] = &[Role::Admin];

#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, create_user, update_user, delete_user),
    components(
        schemas(UserInput, UserResponse, Profile, Role),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User administration endpoints")
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(
        schemas(RegisterInput, LoginInput, AuthResponse, Profile, Role),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login")
    )
)]
pub struct AuthApiDoc;

/// Users router. Every route requires an ADMIN token.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: &JwtAuth) -> Router {
    let by_id = || RequestSchema::new().object_id("id");

    Router::new()
        .route(
            "/",
            RoutePipeline::new().authorize(auth, ADMIN).apply(get(list_users)),
        )
        .route(
            "/{id}",
            RoutePipeline::new()
                .validate(by_id())
                .authorize(auth, ADMIN)
                .apply(get(get_user)),
        )
        .route(
            "/add",
            RoutePipeline::new()
                .validate(RequestSchema::new().json::<UserInput>())
                .authorize(auth, ADMIN)
                .apply(post(create_user)),
        )
        .route(
            "/update/{id}",
            RoutePipeline::new()
                .validate(by_id().json::<UserInput>())
                .authorize(auth, ADMIN)
                .apply(put(update_user)),
        )
        .route(
            "/delete/{id}",
            RoutePipeline::new()
                .validate(by_id())
                .authorize(auth, ADMIN)
                .apply(delete(delete_user)),
        )
        .with_state(Arc::new(service))
}

/// Public registration and login.
pub fn auth_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route(
            "/register",
            RoutePipeline::new()
                .validate(RequestSchema::new().json::<RegisterInput>())
                .apply(post(register)),
        )
        .route(
            "/login",
            RoutePipeline::new()
                .validate(RequestSchema::new().json::<LoginInput>())
                .apply(post(login)),
        )
        .with_state(Arc::new(service))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.get_user(id).await?.into()))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/add",
    tag = "Users",
    request_body = UserInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<UserInput>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = UserInput,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    Json(input): Json<UserInput>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.update_user(id, input).await?.into()))
}

/// Delete a user, returning it
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.delete_user(id).await?.into()))
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterInput,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<RegisterInput>,
) -> UserResult<impl IntoResponse> {
    let issued = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<LoginInput>,
) -> UserResult<Json<AuthResponse>> {
    Ok(Json(service.login(input).await?))
}
