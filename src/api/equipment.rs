//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        enums::Subsystem,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateAssignment, UpdateEquipment},
        task::{MaintenanceTask, TaskQuery},
    },
};

use super::AuthenticatedUser;

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "VSD already linked")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    claims.require_manager()?;
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment (only provided fields)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "VSD already linked")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    claims.require_manager()?;
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Replace the specs of one subsystem
#[utoipa::path(
    put,
    path = "/equipment/{id}/specs/{subsystem}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID"),
        ("subsystem" = Subsystem, Path, description = "Subsystem key")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Specs updated", body = Equipment),
        (status = 400, description = "Specs must be a JSON object")
    )
)]
pub async fn update_specs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, subsystem)): Path<(i32, Subsystem)>,
    Json(specs): Json<serde_json::Value>,
) -> AppResult<Json<Equipment>> {
    claims.require_manager()?;
    let equipment = state.services.equipment.update_specs(id, subsystem, &specs).await?;
    Ok(Json(equipment))
}

/// Assign or unassign a technician
#[utoipa::path(
    put,
    path = "/equipment/{id}/assignment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = Equipment),
        (status = 404, description = "Equipment or technician not found")
    )
)]
pub async fn update_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAssignment>,
) -> AppResult<Json<Equipment>> {
    claims.require_manager()?;
    let equipment = state.services.equipment.assign(id, data.technician_id).await?;
    Ok(Json(equipment))
}

/// Delete equipment and its linked VSD
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Due and upcoming maintenance tasks of one piece of equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/tasks",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID"), TaskQuery),
    responses(
        (status = 200, description = "Generated tasks", body = Vec<MaintenanceTask>)
    )
)]
pub async fn list_equipment_tasks(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<MaintenanceTask>>> {
    let tasks = state.services.tasks.for_equipment(id, query.as_of).await?;
    Ok(Json(tasks))
}
