//! Daily diary (contractor/client shift report) model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::signature::Signature;

/// Manpower line: how many people of a role worked, and for how long
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManpowerEntry {
    pub role: String,
    pub count: u32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkItem {
    pub description: String,
    pub equipment_id: Option<i32>,
    /// Free-form progress note ("done", "ongoing", ...)
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Delay {
    pub description: String,
    /// At most one day per entry
    #[validate(range(max = 1440, message = "A delay cannot exceed 1440 minutes"))]
    pub duration_minutes: u32,
}

/// Shift report with its two-step approval state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyDiary {
    pub id: i32,
    pub diary_date: NaiveDate,
    pub shift: Option<String>,
    pub contractor: Option<String>,
    #[schema(value_type = Vec<ManpowerEntry>)]
    pub manpower: Json<Vec<ManpowerEntry>>,
    #[schema(value_type = Vec<WorkItem>)]
    pub work_items: Json<Vec<WorkItem>>,
    #[schema(value_type = Vec<Delay>)]
    pub delays: Json<Vec<Delay>>,
    pub comments: Option<String>,
    #[schema(value_type = Option<Signature>)]
    pub contractor_signature: Option<Json<Signature>>,
    #[schema(value_type = Option<Signature>)]
    pub client_signature: Option<Json<Signature>>,
    pub is_signed_off: bool,
    pub is_finalised: bool,
    pub created_by: i32,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl DailyDiary {
    pub fn total_man_hours(&self) -> f64 {
        self.manpower
            .iter()
            .map(|entry| f64::from(entry.count) * entry.hours)
            .sum()
    }

    pub fn total_delay_minutes(&self) -> i64 {
        self.delays.iter().map(|delay| i64::from(delay.duration_minutes)).sum()
    }
}

/// Create diary request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDailyDiary {
    pub diary_date: NaiveDate,
    pub shift: Option<String>,
    pub contractor: Option<String>,
    #[serde(default)]
    pub manpower: Vec<ManpowerEntry>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
    #[serde(default)]
    #[validate(nested)]
    pub delays: Vec<Delay>,
    #[validate(length(max = 10000, message = "Comments are too long"))]
    pub comments: Option<String>,
}

/// Update diary request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDailyDiary {
    pub diary_date: Option<NaiveDate>,
    pub shift: Option<String>,
    pub contractor: Option<String>,
    pub manpower: Option<Vec<ManpowerEntry>>,
    pub work_items: Option<Vec<WorkItem>>,
    #[validate(nested)]
    pub delays: Option<Vec<Delay>>,
    #[validate(length(max = 10000, message = "Comments are too long"))]
    pub comments: Option<String>,
}

/// PIN-gated signature request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignDiaryRequest {
    pub pin: String,
}

/// Query parameters for diary lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DailyDiaryQuery {
    /// From this date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Until this date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    pub is_finalised: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diary() -> DailyDiary {
        DailyDiary {
            id: 1,
            diary_date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            shift: Some("day".to_string()),
            contractor: Some("Ridgeway Electrical".to_string()),
            manpower: Json(vec![
                ManpowerEntry { role: "Fitter".to_string(), count: 3, hours: 8.0 },
                ManpowerEntry { role: "Rigger".to_string(), count: 2, hours: 4.5 },
            ]),
            work_items: Json(vec![]),
            delays: Json(vec![
                Delay { description: "Permit wait".to_string(), duration_minutes: 45 },
                Delay { description: "Crane unavailable".to_string(), duration_minutes: 30 },
            ]),
            comments: None,
            contractor_signature: None,
            client_signature: None,
            is_signed_off: false,
            is_finalised: false,
            created_by: 7,
            crea_date: None,
            modif_date: None,
        }
    }

    #[test]
    fn test_totals() {
        let d = diary();
        assert_eq!(d.total_man_hours(), 33.0);
        assert_eq!(d.total_delay_minutes(), 75);
    }

    #[test]
    fn test_delay_total_does_not_overflow() {
        let mut d = diary();
        d.delays = Json(vec![
            Delay { description: "Site shutdown".to_string(), duration_minutes: u32::MAX },
            Delay { description: "Permit wait".to_string(), duration_minutes: 1 },
        ]);
        assert_eq!(d.total_delay_minutes(), i64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_delay_duration_is_bounded() {
        let mut create = CreateDailyDiary {
            diary_date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            shift: None,
            contractor: None,
            manpower: vec![],
            work_items: vec![],
            delays: vec![Delay { description: "Storm".to_string(), duration_minutes: 1440 }],
            comments: None,
        };
        assert!(create.validate().is_ok());

        create.delays.push(Delay { description: "Overrun".to_string(), duration_minutes: u32::MAX });
        assert!(create.validate().is_err());

        let update = UpdateDailyDiary {
            delays: Some(vec![Delay { description: "Overrun".to_string(), duration_minutes: 1441 }]),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
