//! Generated maintenance task model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::enums::MaintenanceFrequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Overdue,
}

/// A due or upcoming maintenance task; computed on request, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceTask {
    /// `{equipment_id}-{frequency}`, e.g. `17-3-Monthly`
    pub id: String,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub frequency: MaintenanceFrequency,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub assigned_to: Option<i32>,
    pub assigned_to_name: Option<String>,
}

/// Query parameters for task lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    /// Only tasks on equipment assigned to this technician
    pub assigned_to: Option<i32>,
    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    pub as_of: Option<NaiveDate>,
}
