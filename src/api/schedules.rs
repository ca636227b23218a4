//! Maintenance schedule endpoints (completed checklists and the upcoming plan)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        enums::UserRole,
        schedule::{
            CompletedSchedule, CompletedScheduleQuery, CreateUpcomingSchedule,
            SaveCompletedSchedule, UpcomingSchedule, UpcomingScheduleQuery, UpdateUpcomingSchedule,
        },
    },
};

use super::AuthenticatedUser;

/// List completed checklists
#[utoipa::path(
    get,
    path = "/schedules/completed",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(CompletedScheduleQuery),
    responses(
        (status = 200, description = "Completed schedules", body = Vec<CompletedSchedule>)
    )
)]
pub async fn list_completed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<CompletedScheduleQuery>,
) -> AppResult<Json<Vec<CompletedSchedule>>> {
    let schedules = state.services.schedules.list_completed(&query).await?;
    Ok(Json(schedules))
}

/// Get a completed checklist
#[utoipa::path(
    get,
    path = "/schedules/completed/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Completed schedule ID")),
    responses(
        (status = 200, description = "Completed schedule", body = CompletedSchedule),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_completed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CompletedSchedule>> {
    let schedule = state.services.schedules.get_completed(id).await?;
    Ok(Json(schedule))
}

/// Record a completed checklist
#[utoipa::path(
    post,
    path = "/schedules/completed",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = SaveCompletedSchedule,
    responses(
        (status = 201, description = "Completed schedule recorded", body = CompletedSchedule)
    )
)]
pub async fn create_completed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<SaveCompletedSchedule>,
) -> AppResult<(StatusCode, Json<CompletedSchedule>)> {
    let schedule = state.services.schedules.create_completed(&data, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Re-save a completed checklist (full replacement)
#[utoipa::path(
    put,
    path = "/schedules/completed/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Completed schedule ID")),
    request_body = SaveCompletedSchedule,
    responses(
        (status = 200, description = "Completed schedule replaced", body = CompletedSchedule)
    )
)]
pub async fn replace_completed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<SaveCompletedSchedule>,
) -> AppResult<Json<CompletedSchedule>> {
    let schedule = state.services.schedules.replace_completed(id, &data, claims.user_id).await?;
    Ok(Json(schedule))
}

/// Delete a completed checklist
#[utoipa::path(
    delete,
    path = "/schedules/completed/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Completed schedule ID")),
    responses(
        (status = 204, description = "Completed schedule deleted")
    )
)]
pub async fn delete_completed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_manager()?;
    state.services.schedules.delete_completed(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List planned maintenance
#[utoipa::path(
    get,
    path = "/schedules/upcoming",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(UpcomingScheduleQuery),
    responses(
        (status = 200, description = "Upcoming schedules", body = Vec<UpcomingSchedule>)
    )
)]
pub async fn list_upcoming(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<UpcomingScheduleQuery>,
) -> AppResult<Json<Vec<UpcomingSchedule>>> {
    let schedules = state.services.schedules.list_upcoming(&query).await?;
    Ok(Json(schedules))
}

/// Plan maintenance
#[utoipa::path(
    post,
    path = "/schedules/upcoming",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateUpcomingSchedule,
    responses(
        (status = 201, description = "Upcoming schedule created", body = UpcomingSchedule)
    )
)]
pub async fn create_upcoming(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateUpcomingSchedule>,
) -> AppResult<(StatusCode, Json<UpcomingSchedule>)> {
    claims.require_role(UserRole::Supervisor)?;
    let schedule = state.services.schedules.create_upcoming(&data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update planned maintenance
#[utoipa::path(
    put,
    path = "/schedules/upcoming/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Upcoming schedule ID")),
    request_body = UpdateUpcomingSchedule,
    responses(
        (status = 200, description = "Upcoming schedule updated", body = UpcomingSchedule)
    )
)]
pub async fn update_upcoming(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateUpcomingSchedule>,
) -> AppResult<Json<UpcomingSchedule>> {
    claims.require_role(UserRole::Supervisor)?;
    let schedule = state.services.schedules.update_upcoming(id, &data).await?;
    Ok(Json(schedule))
}

/// Remove planned maintenance
#[utoipa::path(
    delete,
    path = "/schedules/upcoming/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Upcoming schedule ID")),
    responses(
        (status = 204, description = "Upcoming schedule deleted")
    )
)]
pub async fn delete_upcoming(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_role(UserRole::Supervisor)?;
    state.services.schedules.delete_upcoming(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
