//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::user::{
        CreateUser, UpdateSignature, UpdateSigningPin, UpdateUser, UserQuery, UserResponse,
        UserShort,
    },
};

use super::AuthenticatedUser;

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<UserShort>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<UserShort>>> {
    let users = state.services.users.search_users(&query).await?;
    Ok(Json(users))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user.into()))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    claims.require_admin()?;
    let user = state.services.users.create_user(&data).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    claims.require_admin()?;
    let user = state.services.users.update_user(id, &data).await?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 409, description = "User is referenced by existing records")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse)
    )
)]
pub async fn get_me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_by_id(claims.user_id).await?;
    Ok(Json(user.into()))
}

/// Store the current user's signature image
#[utoipa::path(
    put,
    path = "/users/me/signature",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateSignature,
    responses(
        (status = 200, description = "Signature updated", body = UserResponse)
    )
)]
pub async fn update_my_signature(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<UpdateSignature>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.update_signature(claims.user_id, &data).await?;
    Ok(Json(user.into()))
}

/// Set or change the current user's signing PIN
#[utoipa::path(
    put,
    path = "/users/me/pin",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateSigningPin,
    responses(
        (status = 204, description = "PIN updated"),
        (status = 400, description = "PIN must be 4 to 8 digits"),
        (status = 401, description = "Current PIN is incorrect")
    )
)]
pub async fn update_my_pin(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<UpdateSigningPin>,
) -> AppResult<StatusCode> {
    state.services.users.update_signing_pin(claims.user_id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}
