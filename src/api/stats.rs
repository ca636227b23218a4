//! Fleet statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::report::FleetStats};

use super::AuthenticatedUser;

/// Fleet-wide equipment, VSD, breakdown and task figures
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fleet statistics", body = FleetStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<FleetStats>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
