//! Generated maintenance task endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::task::{MaintenanceTask, TaskQuery},
};

use super::AuthenticatedUser;

/// Due and upcoming maintenance tasks across the fleet
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(TaskQuery),
    responses(
        (status = 200, description = "Generated tasks, soonest first", body = Vec<MaintenanceTask>)
    )
)]
pub async fn list_tasks(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<MaintenanceTask>>> {
    let tasks = state.services.tasks.list(&query).await?;
    Ok(Json(tasks))
}
