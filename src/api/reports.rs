//! Report data endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::report::{ReportQuery, ReportSummary},
};

use super::AuthenticatedUser;

/// Breakdowns, completed schedules and diaries in a date range, with totals
#[utoipa::path(
    get,
    path = "/reports/summary",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportQuery),
    responses(
        (status = 200, description = "Report summary", body = ReportSummary),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "Insufficient rights")
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ReportSummary>> {
    claims.require_report_access()?;
    let summary = state.services.reports.summary(&query).await?;
    Ok(Json(summary))
}
