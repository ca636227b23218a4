//! Breakdown report endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::breakdown::{Breakdown, BreakdownQuery, CreateBreakdown, UpdateBreakdown},
};

use super::AuthenticatedUser;

/// List breakdown reports
#[utoipa::path(
    get,
    path = "/breakdowns",
    tag = "breakdowns",
    security(("bearer_auth" = [])),
    params(BreakdownQuery),
    responses(
        (status = 200, description = "Breakdown reports", body = Vec<Breakdown>)
    )
)]
pub async fn list_breakdowns(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BreakdownQuery>,
) -> AppResult<Json<Vec<Breakdown>>> {
    let breakdowns = state.services.breakdowns.list(&query).await?;
    Ok(Json(breakdowns))
}

/// Get a breakdown report
#[utoipa::path(
    get,
    path = "/breakdowns/{id}",
    tag = "breakdowns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Breakdown report ID")),
    responses(
        (status = 200, description = "Breakdown report", body = Breakdown),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_breakdown(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Breakdown>> {
    let breakdown = state.services.breakdowns.get_by_id(id).await?;
    Ok(Json(breakdown))
}

/// Report a breakdown; the caller is recorded as reporter
#[utoipa::path(
    post,
    path = "/breakdowns",
    tag = "breakdowns",
    security(("bearer_auth" = [])),
    request_body = CreateBreakdown,
    responses(
        (status = 201, description = "Breakdown reported", body = Breakdown)
    )
)]
pub async fn create_breakdown(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateBreakdown>,
) -> AppResult<(StatusCode, Json<Breakdown>)> {
    let breakdown = state.services.breakdowns.create(&data, &claims).await?;
    Ok((StatusCode::CREATED, Json(breakdown)))
}

/// Update a breakdown report
#[utoipa::path(
    put,
    path = "/breakdowns/{id}",
    tag = "breakdowns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Breakdown report ID")),
    request_body = UpdateBreakdown,
    responses(
        (status = 200, description = "Breakdown updated", body = Breakdown),
        (status = 403, description = "Not the reporter or a manager"),
        (status = 422, description = "Report is resolved and locked")
    )
)]
pub async fn update_breakdown(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBreakdown>,
) -> AppResult<Json<Breakdown>> {
    let breakdown = state.services.breakdowns.update(id, &data, &claims).await?;
    Ok(Json(breakdown))
}

/// Delete a breakdown report
#[utoipa::path(
    delete,
    path = "/breakdowns/{id}",
    tag = "breakdowns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Breakdown report ID")),
    responses(
        (status = 204, description = "Breakdown deleted")
    )
)]
pub async fn delete_breakdown(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_manager()?;
    state.services.breakdowns.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
