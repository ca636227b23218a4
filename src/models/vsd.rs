//! Variable-speed drive model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::VsdStatus;

/// VSD record, linked 1:1 to an equipment record through `equipment.vsd_id`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vsd {
    pub id: i32,
    pub serial_number: String,
    pub model: Option<String>,
    pub install_date: Option<NaiveDate>,
    pub status: VsdStatus,
    pub assigned_to: Option<i32>,
    pub assigned_to_name: Option<String>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create VSD request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVsd {
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    pub model: Option<String>,
    pub install_date: Option<NaiveDate>,
    /// Defaults to active
    pub status: Option<VsdStatus>,
    pub notes: Option<String>,
}

/// Update VSD request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVsd {
    #[validate(length(min = 1, message = "Serial number cannot be empty"))]
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub install_date: Option<NaiveDate>,
    pub status: Option<VsdStatus>,
    pub notes: Option<String>,
}
