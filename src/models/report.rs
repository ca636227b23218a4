//! Fleet statistics and date-range report types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{breakdown::Breakdown, diary::DailyDiary, schedule::CompletedSchedule};

/// Fleet-wide metrics
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FleetStats {
    pub equipment_count: i64,
    /// Equipment count per type
    pub equipment_by_type: BTreeMap<String, i64>,
    /// Mean uptime over equipment reporting one
    pub average_uptime: Option<f64>,
    /// Sum of reported power consumption (kWh)
    pub total_power_consumption: f64,
    /// VSD count per status
    pub vsds_by_status: BTreeMap<String, i64>,
    /// Unresolved breakdowns per priority
    pub open_breakdowns_by_priority: BTreeMap<String, i64>,
    pub overdue_tasks: i64,
    pub pending_tasks: i64,
}

/// Inclusive date range for reports
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    /// First day (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last day (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportTotals {
    pub breakdowns: i64,
    pub breakdowns_by_status: BTreeMap<String, i64>,
    pub breakdowns_by_priority: BTreeMap<String, i64>,
    pub completed_schedules: i64,
    pub schedules_by_frequency: BTreeMap<String, i64>,
    /// Checklist lines marked as defects across all schedules
    pub checklist_defects: i64,
    pub diaries: i64,
    pub diaries_finalised: i64,
    pub diaries_pending: i64,
    pub man_hours: f64,
    pub delay_minutes: i64,
}

/// Everything recorded in a date range, as handed to the report writer
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: ReportTotals,
    pub breakdowns: Vec<Breakdown>,
    pub completed_schedules: Vec<CompletedSchedule>,
    pub diaries: Vec<DailyDiary>,
}
