//! Variable-speed drive endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        equipment::UpdateAssignment,
        vsd::{CreateVsd, UpdateVsd, Vsd},
    },
};

use super::AuthenticatedUser;

/// List VSDs
#[utoipa::path(
    get,
    path = "/vsds",
    tag = "vsds",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "VSD list", body = Vec<Vsd>)
    )
)]
pub async fn list_vsds(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Vsd>>> {
    let vsds = state.services.vsds.list().await?;
    Ok(Json(vsds))
}

/// Get a VSD by ID
#[utoipa::path(
    get,
    path = "/vsds/{id}",
    tag = "vsds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "VSD ID")),
    responses(
        (status = 200, description = "VSD details", body = Vsd),
        (status = 404, description = "VSD not found")
    )
)]
pub async fn get_vsd(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vsd>> {
    let vsd = state.services.vsds.get_by_id(id).await?;
    Ok(Json(vsd))
}

/// Create a VSD
#[utoipa::path(
    post,
    path = "/vsds",
    tag = "vsds",
    security(("bearer_auth" = [])),
    request_body = CreateVsd,
    responses(
        (status = 201, description = "VSD created", body = Vsd),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_vsd(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateVsd>,
) -> AppResult<(StatusCode, Json<Vsd>)> {
    claims.require_manager()?;
    let vsd = state.services.vsds.create(&data).await?;
    Ok((StatusCode::CREATED, Json(vsd)))
}

/// Update a VSD
#[utoipa::path(
    put,
    path = "/vsds/{id}",
    tag = "vsds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "VSD ID")),
    request_body = UpdateVsd,
    responses(
        (status = 200, description = "VSD updated", body = Vsd)
    )
)]
pub async fn update_vsd(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateVsd>,
) -> AppResult<Json<Vsd>> {
    claims.require_manager()?;
    let vsd = state.services.vsds.update(id, &data).await?;
    Ok(Json(vsd))
}

/// Assign or unassign a technician
#[utoipa::path(
    put,
    path = "/vsds/{id}/assignment",
    tag = "vsds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "VSD ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = Vsd)
    )
)]
pub async fn update_vsd_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAssignment>,
) -> AppResult<Json<Vsd>> {
    claims.require_manager()?;
    let vsd = state.services.vsds.assign(id, data.technician_id).await?;
    Ok(Json(vsd))
}

/// Delete a VSD
#[utoipa::path(
    delete,
    path = "/vsds/{id}",
    tag = "vsds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "VSD ID")),
    responses(
        (status = 204, description = "VSD deleted")
    )
)]
pub async fn delete_vsd(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.vsds.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
