//! Breakdown report model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{BreakdownPriority, BreakdownStatus};

/// Incident ticket for an equipment failure
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Breakdown {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: Option<String>,
    /// Reporting user
    pub reported_by: i32,
    pub reporter_name: Option<String>,
    pub breakdown_date: NaiveDate,
    pub description: String,
    pub priority: BreakdownPriority,
    pub status: BreakdownStatus,
    pub resolution_notes: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Breakdown {
    pub fn is_resolved(&self) -> bool {
        self.status == BreakdownStatus::Resolved
    }
}

/// Create breakdown request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBreakdown {
    pub equipment_id: i32,
    /// Defaults to today
    pub breakdown_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Defaults to medium
    pub priority: Option<BreakdownPriority>,
}

/// Update breakdown request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBreakdown {
    pub breakdown_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub priority: Option<BreakdownPriority>,
    pub status: Option<BreakdownStatus>,
    pub resolution_notes: Option<String>,
}

/// Query parameters for breakdown lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BreakdownQuery {
    pub equipment_id: Option<i32>,
    pub status: Option<BreakdownStatus>,
    /// From this date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Until this date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}
