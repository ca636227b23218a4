//! Maintenance schedule models (completed checklists, upcoming plan)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    enums::{ChecklistStatus, MaintenanceFrequency},
    signature::Signature,
};

// ---------------------------------------------------------------------------
// CompletedSchedule
// ---------------------------------------------------------------------------

/// One line of an inspection checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItem {
    pub item: String,
    pub status: ChecklistStatus,
    pub comment: Option<String>,
}

/// A finished maintenance checklist
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompletedSchedule {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: Option<String>,
    pub frequency: MaintenanceFrequency,
    /// Checklist category (e.g. "mechanical", "electrical")
    pub category: String,
    pub completed_date: NaiveDate,
    #[schema(value_type = Vec<String>)]
    pub work_crew: Json<Vec<String>>,
    #[schema(value_type = Vec<ChecklistItem>)]
    pub checklist: Json<Vec<ChecklistItem>>,
    #[schema(value_type = Vec<Signature>)]
    pub signatures: Json<Vec<Signature>>,
    pub notes: Option<String>,
    pub completed_by: i32,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl CompletedSchedule {
    /// Number of checklist lines marked as defects
    pub fn defect_count(&self) -> usize {
        self.checklist
            .iter()
            .filter(|line| line.status == ChecklistStatus::Defect)
            .count()
    }
}

/// Save (create or re-save) a completed checklist
///
/// Re-saving replaces the whole document.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveCompletedSchedule {
    pub equipment_id: i32,
    pub frequency: MaintenanceFrequency,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub completed_date: NaiveDate,
    #[serde(default)]
    pub work_crew: Vec<String>,
    #[validate(length(min = 1, message = "Checklist cannot be empty"))]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    pub notes: Option<String>,
}

/// Query parameters for completed checklists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CompletedScheduleQuery {
    pub equipment_id: Option<i32>,
    pub frequency: Option<MaintenanceFrequency>,
    pub category: Option<String>,
    /// From this date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Until this date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// UpcomingSchedule
// ---------------------------------------------------------------------------

/// A planned maintenance entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UpcomingSchedule {
    pub id: i32,
    pub equipment_id: i32,
    pub frequency: MaintenanceFrequency,
    pub scheduled_date: NaiveDate,
    pub assigned_to: Option<i32>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create upcoming schedule request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUpcomingSchedule {
    pub equipment_id: i32,
    pub frequency: MaintenanceFrequency,
    pub scheduled_date: NaiveDate,
    pub assigned_to: Option<i32>,
    pub notes: Option<String>,
}

/// Update upcoming schedule request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUpcomingSchedule {
    pub frequency: Option<MaintenanceFrequency>,
    pub scheduled_date: Option<NaiveDate>,
    pub assigned_to: Option<i32>,
    pub notes: Option<String>,
}

/// Date range filter
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct UpcomingScheduleQuery {
    pub equipment_id: Option<i32>,
    /// From this date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Until this date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}
