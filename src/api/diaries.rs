//! Daily diary endpoints, including sign-off and finalisation

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        diary::{CreateDailyDiary, DailyDiary, DailyDiaryQuery, SignDiaryRequest, UpdateDailyDiary},
        enums::UserRole,
    },
};

use super::AuthenticatedUser;

/// List daily diaries
#[utoipa::path(
    get,
    path = "/diaries",
    tag = "diaries",
    security(("bearer_auth" = [])),
    params(DailyDiaryQuery),
    responses(
        (status = 200, description = "Daily diaries", body = Vec<DailyDiary>)
    )
)]
pub async fn list_diaries(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<DailyDiaryQuery>,
) -> AppResult<Json<Vec<DailyDiary>>> {
    let diaries = state.services.diaries.list(&query).await?;
    Ok(Json(diaries))
}

/// Get a daily diary
#[utoipa::path(
    get,
    path = "/diaries/{id}",
    tag = "diaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Diary ID")),
    responses(
        (status = 200, description = "Daily diary", body = DailyDiary),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_diary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DailyDiary>> {
    let diary = state.services.diaries.get_by_id(id).await?;
    Ok(Json(diary))
}

/// Create a daily diary
#[utoipa::path(
    post,
    path = "/diaries",
    tag = "diaries",
    security(("bearer_auth" = [])),
    request_body = CreateDailyDiary,
    responses(
        (status = 201, description = "Daily diary created", body = DailyDiary)
    )
)]
pub async fn create_diary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateDailyDiary>,
) -> AppResult<(StatusCode, Json<DailyDiary>)> {
    claims.require_role(UserRole::Supervisor)?;
    let diary = state.services.diaries.create(&data, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(diary)))
}

/// Update a daily diary that is not finalised
#[utoipa::path(
    put,
    path = "/diaries/{id}",
    tag = "diaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Diary ID")),
    request_body = UpdateDailyDiary,
    responses(
        (status = 200, description = "Daily diary updated", body = DailyDiary),
        (status = 422, description = "Diary is finalised and locked")
    )
)]
pub async fn update_diary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDailyDiary>,
) -> AppResult<Json<DailyDiary>> {
    claims.require_role(UserRole::Supervisor)?;
    let diary = state.services.diaries.update(id, &data).await?;
    Ok(Json(diary))
}

/// Delete a daily diary that is not finalised
#[utoipa::path(
    delete,
    path = "/diaries/{id}",
    tag = "diaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Diary ID")),
    responses(
        (status = 204, description = "Daily diary deleted"),
        (status = 422, description = "Diary is finalised and locked")
    )
)]
pub async fn delete_diary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_role(UserRole::Supervisor)?;
    state.services.diaries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Contractor sign-off with the caller's signing PIN
#[utoipa::path(
    post,
    path = "/diaries/{id}/sign-off",
    tag = "diaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Diary ID")),
    request_body = SignDiaryRequest,
    responses(
        (status = 200, description = "Diary signed off", body = DailyDiary),
        (status = 401, description = "Invalid signing PIN"),
        (status = 409, description = "Already signed off")
    )
)]
pub async fn sign_off_diary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<SignDiaryRequest>,
) -> AppResult<Json<DailyDiary>> {
    let diary = state.services.diaries.sign_off(id, &data.pin, &claims).await?;
    Ok(Json(diary))
}

/// Client finalisation with the caller's signing PIN
#[utoipa::path(
    post,
    path = "/diaries/{id}/finalise",
    tag = "diaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Diary ID")),
    request_body = SignDiaryRequest,
    responses(
        (status = 200, description = "Diary finalised", body = DailyDiary),
        (status = 401, description = "Invalid signing PIN"),
        (status = 409, description = "Already finalised"),
        (status = 422, description = "Diary not signed off yet")
    )
)]
pub async fn finalise_diary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<SignDiaryRequest>,
) -> AppResult<Json<DailyDiary>> {
    let diary = state.services.diaries.finalise(id, &data.pin, &claims).await?;
    Ok(Json(diary))
}
